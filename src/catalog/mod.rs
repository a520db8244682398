//! Static fact tables shown by the visualizations. Everything here is
//! `&'static` and keyed by a stable identifier.

mod continents;
mod planets;
mod shapes;

pub use continents::{continent, continent_by_index, ContinentRecord, CONTINENTS};
pub use planets::{
    orbit, planet, planet_texture_path, PlanetOrbit, PlanetRecord, RingConfig, ORBITS, PLANETS,
    SATURN_RINGS,
};
pub use shapes::{shape_detail, ShapeDetail, ShapeKind, ParseShapeError};
