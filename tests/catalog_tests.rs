use std::collections::HashSet;
use std::path::Path;

use edu_viz::catalog::{
    continent, continent_by_index, orbit, planet, planet_texture_path, shape_detail, ShapeKind,
    CONTINENTS, ORBITS, PLANETS, SATURN_RINGS,
};
use edu_viz::math::Rgb;

#[cfg(test)]
mod catalog_tests {
    use super::*;

    #[test]
    fn test_planets_and_orbits_share_ids_in_order() {
        let ids: Vec<_> = PLANETS.iter().map(|p| p.id).collect();
        let orbit_ids: Vec<_> = ORBITS.iter().map(|o| o.id).collect();
        assert_eq!(ids, orbit_ids);
        assert!(ORBITS.windows(2).all(|w| w[0].distance < w[1].distance), "orbits ordered outward");
        for id in ids {
            assert!(planet(id).is_some() && orbit(id).is_some(), "{} should resolve", id);
        }
        assert!(planet("pluto").is_none());
        assert!(orbit(SATURN_RINGS.planet).is_some());
    }

    #[test]
    fn test_planet_texture_path() {
        let path = planet_texture_path(Path::new("assets"), "mars");
        assert_eq!(path, Path::new("assets/textures/planets/mars.jpg"));
    }

    #[test]
    fn test_continent_lookup() {
        assert_eq!(CONTINENTS.len(), 7);
        let names: HashSet<_> = CONTINENTS.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), CONTINENTS.len(), "continent names are unique");

        for (i, record) in CONTINENTS.iter().enumerate() {
            assert_eq!(continent(record.name).map(|c| c.name), Some(record.name));
            assert_eq!(continent_by_index(i).map(|c| c.name), Some(record.name));
            assert!(Rgb::parse_hex(record.color).is_some(), "{} has a bad color", record.name);
        }
        assert!(continent_by_index(CONTINENTS.len()).is_none());
        assert!(continent("Atlántida").is_none());
    }

    #[test]
    fn test_shape_names_parse_case_insensitively() {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.name().to_lowercase().parse::<ShapeKind>(), Ok(kind));
            assert_eq!(shape_detail(kind).kind, kind);
        }
        assert!("Torus".parse::<ShapeKind>().is_err());
    }
}
