use crate::habitat::Habitat;
use crate::perception::{choose_heading, perceive};
use crate::systems::movement::MovementResolver;
use crate::systems::{biological, ecological, growth, interaction, SystemContext};
use crate::world::finalize::reconcile_habitat;
use crate::world::World;
use pixelgenesis_data::{Heading, OrganismId, TickCounters};
use rand::Rng;

impl World {
    /// Advances the simulation by exactly one tick.
    ///
    /// Order: headings, movement, growth for organisms that stood still,
    /// combat, periodic food spawn, feeding, metabolism, reproduction, food
    /// decay and finally reconciliation of the registries with the grid.
    pub fn step(&mut self) {
        self.tick += 1;
        self.counters = TickCounters::default();

        let habitat = &mut self.habitat;
        let mut ctx = SystemContext::new(
            &self.config,
            self.tick,
            &mut self.rng,
            &mut self.counters,
        );

        pass_headings(habitat, &mut ctx);
        MovementResolver::new(habitat, ctx.config).run(habitat, &mut ctx);
        growth::growth_system(habitat, &mut ctx);
        interaction::combat_system(habitat, &mut ctx);
        ecological::food_spawn_system(habitat, &mut ctx);
        interaction::feeding_system(habitat, &mut ctx);
        biological::metabolism_system(habitat, &mut ctx);
        biological::reproduction_system(habitat, &mut ctx);
        ecological::food_decay_system(habitat, &mut ctx);
        reconcile_habitat(habitat, ctx.food_ttl(), ctx.tick);
    }

    /// Runs `ticks` steps, stopping early once no organism is left.
    /// Returns the number of steps taken.
    pub fn run(&mut self, ticks: u64) -> u64 {
        for done in 0..ticks {
            if self.habitat.organisms.is_empty() {
                return done;
            }
            self.step();
        }
        ticks
    }
}

/// Every organism looks around and picks this tick's heading. All headings
/// are decided on the same view of the grid before any is applied.
fn pass_headings<R: Rng>(habitat: &mut Habitat, ctx: &mut SystemContext<R>) {
    let decisions: Vec<(OrganismId, Heading)> = habitat
        .organisms
        .values()
        .map(|org| {
            let seen = perceive(&habitat.grid, &habitat.organisms, org);
            (org.id, choose_heading(org, &seen, ctx.config, ctx.rng))
        })
        .collect();
    for (id, heading) in decisions {
        if let Some(org) = habitat.organisms.get_mut(&id) {
            org.heading = heading;
        }
    }
}
