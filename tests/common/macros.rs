/// Asserts that an organism with the given id has exactly the given energy.
#[macro_export]
macro_rules! assert_energy_eq {
    ($world:expr, $id:expr, $energy:expr) => {
        let organism = $world.organism($id).expect("Organism not found in world");
        assert_eq!(
            organism.energy, $energy,
            "Organism {} energy {} is not {}",
            $id, organism.energy, $energy
        );
    };
}

/// Asserts that an organism with the given id is no longer registered.
#[macro_export]
macro_rules! assert_organism_dead {
    ($world:expr, $id:expr) => {
        assert!(
            $world.organism($id).is_none(),
            "Organism {} should be dead but was found alive",
            $id
        );
    };
}

/// Asserts the grid code at `(x, y)`.
#[macro_export]
macro_rules! assert_cell {
    ($world:expr, $x:expr, $y:expr, $code:expr) => {
        let at = pixelgenesis_lib::model::Coord::new($x, $y);
        assert_eq!(
            $world.grid().code(at),
            $code,
            "Unexpected code at {}",
            at
        );
    };
}

/// Asserts the total population count.
#[macro_export]
macro_rules! assert_population {
    ($world:expr, $count:expr) => {
        assert_eq!(
            $world.organisms().len(),
            $count,
            "Population count mismatch"
        );
    };
}
