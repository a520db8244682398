use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanetRecord {
    pub id: &'static str,
    pub name: &'static str,
    pub distance_from_sun: &'static str,
    pub diameter: &'static str,
    pub orbital_period: &'static str,
    pub description: &'static str,
}

/// Scene placement and motion of one planet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetOrbit {
    pub id: &'static str,
    pub radius: f32,
    pub distance: f32,
    /// Orbit pivot rotation, multiplied by `dt * 10`
    pub speed: f32,
    /// Self spin, multiplied by `dt * 10`
    pub rotation_speed: f32,
    pub fallback_color: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingConfig {
    pub planet: &'static str,
    /// Multiples of the planet radius
    pub inner: f32,
    pub outer: f32,
    pub tilt_degrees: f32,
    pub color: u32,
    pub opacity: f32,
}

pub const PLANETS: [PlanetRecord; 8] = [
    PlanetRecord {
        id: "mercury",
        name: "Mercurio",
        distance_from_sun: "57.9 millones km",
        diameter: "4,879 km",
        orbital_period: "88 días",
        description: "El planeta más cercano al Sol y el más pequeño del sistema solar.",
    },
    PlanetRecord {
        id: "venus",
        name: "Venus",
        distance_from_sun: "108.2 millones km",
        diameter: "12,104 km",
        orbital_period: "225 días",
        description: "El planeta más caliente del sistema solar debido a su efecto invernadero.",
    },
    PlanetRecord {
        id: "earth",
        name: "Tierra",
        distance_from_sun: "149.6 millones km",
        diameter: "12,756 km",
        orbital_period: "365 días",
        description: "Nuestro planeta, el único conocido que alberga vida.",
    },
    PlanetRecord {
        id: "mars",
        name: "Marte",
        distance_from_sun: "227.9 millones km",
        diameter: "6,792 km",
        orbital_period: "687 días",
        description: "El planeta rojo, conocido por sus casquetes polares y posibilidad de agua.",
    },
    PlanetRecord {
        id: "jupiter",
        name: "Júpiter",
        distance_from_sun: "778.5 millones km",
        diameter: "142,984 km",
        orbital_period: "12 años",
        description: "El planeta más grande del sistema solar, un gigante gaseoso.",
    },
    PlanetRecord {
        id: "saturn",
        name: "Saturno",
        distance_from_sun: "1,434 millones km",
        diameter: "120,536 km",
        orbital_period: "29 años",
        description: "Famoso por sus anillos espectaculares, compuestos de hielo y roca.",
    },
    PlanetRecord {
        id: "uranus",
        name: "Urano",
        distance_from_sun: "2,871 millones km",
        diameter: "51,118 km",
        orbital_period: "84 años",
        description: "Un gigante helado que gira de lado, con anillos tenues.",
    },
    PlanetRecord {
        id: "neptune",
        name: "Neptuno",
        distance_from_sun: "4,495 millones km",
        diameter: "49,528 km",
        orbital_period: "165 años",
        description: "El planeta más lejano, conocido por sus vientos más rápidos del sistema solar.",
    },
];

pub const ORBITS: [PlanetOrbit; 8] = [
    PlanetOrbit { id: "mercury", radius: 0.4, distance: 8.0, speed: 0.04, rotation_speed: 0.01, fallback_color: 0x8c7853 },
    PlanetOrbit { id: "venus", radius: 0.7, distance: 12.0, speed: 0.015, rotation_speed: 0.005, fallback_color: 0xffc649 },
    PlanetOrbit { id: "earth", radius: 0.8, distance: 16.0, speed: 0.01, rotation_speed: 0.015, fallback_color: 0x6b93d6 },
    PlanetOrbit { id: "mars", radius: 0.6, distance: 20.0, speed: 0.008, rotation_speed: 0.012, fallback_color: 0xcd5c5c },
    PlanetOrbit { id: "jupiter", radius: 2.2, distance: 28.0, speed: 0.004, rotation_speed: 0.02, fallback_color: 0xd8ca9d },
    PlanetOrbit { id: "saturn", radius: 1.8, distance: 36.0, speed: 0.003, rotation_speed: 0.018, fallback_color: 0xfad5a5 },
    PlanetOrbit { id: "uranus", radius: 1.2, distance: 44.0, speed: 0.002, rotation_speed: 0.01, fallback_color: 0x4fd0e7 },
    PlanetOrbit { id: "neptune", radius: 1.1, distance: 52.0, speed: 0.001, rotation_speed: 0.012, fallback_color: 0x4b70dd },
];

pub const SATURN_RINGS: RingConfig = RingConfig {
    planet: "saturn",
    inner: 1.6,
    outer: 2.8,
    tilt_degrees: 26.7,
    color: 0xfad5a5,
    opacity: 0.85,
};

pub fn planet(id: &str) -> Option<&'static PlanetRecord> {
    PLANETS.iter().find(|p| p.id == id)
}

pub fn orbit(id: &str) -> Option<&'static PlanetOrbit> {
    ORBITS.iter().find(|o| o.id == id)
}

/// `<asset_dir>/textures/planets/<id>.jpg`
pub fn planet_texture_path(asset_dir: &Path, id: &str) -> PathBuf {
    asset_dir
        .join("textures")
        .join("planets")
        .join(format!("{id}.jpg"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbits_and_records_share_ids() {
        for (record, orbit) in PLANETS.iter().zip(ORBITS.iter()) {
            assert_eq!(record.id, orbit.id);
        }
    }

    #[test]
    fn orbits_increase_outward() {
        assert!(ORBITS.windows(2).all(|w| w[0].distance < w[1].distance));
    }

    #[test]
    fn lookup_misses_are_none() {
        assert_eq!(planet("earth").map(|p| p.name), Some("Tierra"));
        assert!(planet("pluto").is_none());
        assert!(orbit("pluto").is_none());
    }

    #[test]
    fn texture_path_layout() {
        let p = planet_texture_path(Path::new("assets"), "mars");
        assert!(p.ends_with("textures/planets/mars.jpg"));
    }
}
