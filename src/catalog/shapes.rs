use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    Cube,
    Sphere,
    Pyramid,
    Prism,
    Cylinder,
    Dodecahedron,
}

impl ShapeKind {
    /// Selector order
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Cube,
        ShapeKind::Sphere,
        ShapeKind::Pyramid,
        ShapeKind::Prism,
        ShapeKind::Dodecahedron,
        ShapeKind::Cylinder,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ShapeKind::Cube => "Cube",
            ShapeKind::Sphere => "Sphere",
            ShapeKind::Pyramid => "Pyramid",
            ShapeKind::Prism => "Prism",
            ShapeKind::Cylinder => "Cylinder",
            ShapeKind::Dodecahedron => "Dodecahedron",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shape: {0}")]
pub struct ParseShapeError(pub String);

impl FromStr for ShapeKind {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseShapeError(s.to_string()))
    }
}

/// Card text for one shape kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDetail {
    pub kind: ShapeKind,
    pub title: &'static str,
    pub description: &'static str,
    pub examples: &'static str,
    pub fact: &'static str,
    pub icon: &'static str,
    pub accent: &'static str,
}

const DETAILS: [ShapeDetail; 6] = [
    ShapeDetail {
        kind: ShapeKind::Cube,
        title: "Cubo Inventor",
        description: "La figura perfecta para construir dados, cajas y edificios futuristas con líneas definidas.",
        examples: "Dados, cubos de Rubik, bloques de construcción",
        fact: "Sus 6 caras gemelas permiten apilarlo con facilidad en cualquier dirección.",
        icon: "🔷",
        accent: "#60a5fa",
    },
    ShapeDetail {
        kind: ShapeKind::Sphere,
        title: "Esfera Galáctica",
        description: "Super suave y aerodinámica, ideal para planetas, burbujas y mundos flotantes.",
        examples: "Planetas, pelotas deportivas, gotas de agua",
        fact: "Cada punto de la superficie está a la misma distancia del centro, por eso rueda tan bien.",
        icon: "🌐",
        accent: "#a855f7",
    },
    ShapeDetail {
        kind: ShapeKind::Pyramid,
        title: "Pirámide Ancestral",
        description: "Estable y elegante, perfecta para construir templos o esculturas con energía misteriosa.",
        examples: "Pirámides egipcias, kioscos modernos, cristales",
        fact: "Con una base cuadrada y un ápice puntiagudo, concentra la fuerza en la cima.",
        icon: "🛕",
        accent: "#f97316",
    },
    ShapeDetail {
        kind: ShapeKind::Prism,
        title: "Prisma Creativo",
        description: "Gran compañero para dividir la luz y crear estructuras dinámicas y futuristas.",
        examples: "Prismas de luz, refugios minimalistas, esculturas",
        fact: "Sus caras rectangulares conectan dos triángulos gemelos, creando volumen con pocos vértices.",
        icon: "🔺",
        accent: "#10b981",
    },
    ShapeDetail {
        kind: ShapeKind::Cylinder,
        title: "Cilindro Futurista",
        description: "Combina círculos y rectas, ideal para cohetes, columnas y robots simpáticos.",
        examples: "Latas, torres, motores, columnas",
        fact: "Si cortas el cilindro a lo largo obtienes un rectángulo perfecto: magia geométrica.",
        icon: "🛸",
        accent: "#f472b6",
    },
    ShapeDetail {
        kind: ShapeKind::Dodecahedron,
        title: "Dodecaedro Místico",
        description: "Una figura platónica con caras pentagonales, elegante y compleja, perfecta para arte y puzzles.",
        examples: "Cristales geométricos, rompecabezas, diseños ornamentales",
        fact: "Tiene 12 caras pentagonales, 20 vértices y 30 aristas; su simetría inspira arquitectura y diseño.",
        icon: "🔷",
        accent: "#8b5cf6",
    },
];

pub fn shape_detail(kind: ShapeKind) -> &'static ShapeDetail {
    // DETAILS is declared in enum order
    &DETAILS[kind as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("cube".parse::<ShapeKind>().unwrap(), ShapeKind::Cube);
        assert_eq!(" Dodecahedron ".parse::<ShapeKind>().unwrap(), ShapeKind::Dodecahedron);
        assert!("Torus".parse::<ShapeKind>().is_err());
    }

    #[test]
    fn every_kind_has_its_own_detail() {
        for kind in ShapeKind::ALL {
            assert_eq!(shape_detail(kind).kind, kind);
        }
        assert_eq!(shape_detail(ShapeKind::Cube).title, "Cubo Inventor");
    }
}
