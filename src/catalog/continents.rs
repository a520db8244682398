#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinentRecord {
    pub name: &'static str,
    pub area: &'static str,
    pub population: &'static str,
    pub fun_facts: [&'static str; 4],
    /// Hex, `#rrggbb` or `#rrggbbaa`
    pub color: &'static str,
    pub icon: &'static str,
    /// Marker direction on the globe; not normalized
    pub position: [f32; 3],
    /// First entry is the signature animal used by the quiz
    pub animals: [&'static str; 5],
}

impl ContinentRecord {
    pub fn short_name(&self) -> &'static str {
        self.name.split(' ').next().unwrap_or(self.name)
    }

    pub fn signature_animal(&self) -> &'static str {
        self.animals[0]
    }
}

pub const CONTINENTS: [ContinentRecord; 7] = [
    ContinentRecord {
        name: "África",
        area: "30.3 millones km²",
        population: "1.400 millones",
        fun_facts: [
            "¡Es el continente con más países! Tiene 54 países diferentes.",
            "Aquí viven los animales más grandes: elefantes y jirafas.",
            "El río Nilo es el más largo del mundo.",
            "¡El desierto del Sahara es enorme! Es como 10 países juntos.",
        ],
        color: "#FF6B35",
        icon: "🦁",
        position: [0.5, 0.2, 0.8],
        animals: ["León", "Elefante", "Jirafa", "Hipopótamo", "Leopardo"],
    },
    ContinentRecord {
        name: "Asia",
        area: "44.6 millones km²",
        population: "4.600 millones",
        fun_facts: [
            "¡Es el continente más grande del mundo!",
            "Aquí está el monte Everest, la montaña más alta.",
            "Viven pandas gigantes que comen bambú.",
            "¡China e India son los países con más gente!",
        ],
        color: "#4ECDC4",
        icon: "🐼",
        position: [0.8, 0.3, 0.5],
        animals: ["Panda", "Tigre", "Elefante Asiático", "Mono", "Camello"],
    },
    ContinentRecord {
        name: "Europa",
        area: "10.2 millones km²",
        population: "750 millones",
        fun_facts: [
            "¡Tiene países muy pequeños como el Vaticano!",
            "Aquí inventaron la pizza y el chocolate.",
            "Muchos castillos de princesas y caballeros.",
            "¡En invierno hace mucho frío y nieva!",
        ],
        color: "#45B7D1",
        icon: "🏰",
        position: [0.3, 0.5, 0.8],
        animals: ["Oso Pardo", "Zorro", "Lobo", "Ciervo", "Águila"],
    },
    ContinentRecord {
        name: "América del Norte",
        area: "24.7 millones km²",
        population: "580 millones",
        fun_facts: [
            "¡Tiene el país más grande del mundo: Canadá!",
            "Aquí viven los osos grizzly enormes.",
            "Las cataratas del Niágara son super grandes.",
            "¡En México hay pirámides antiguas!",
        ],
        color: "#96CEB4",
        icon: "🐻",
        position: [-0.8, 0.4, 0.4],
        animals: ["Oso Grizzly", "Águila Calva", "Lobo", "Alce", "Bisonte"],
    },
    ContinentRecord {
        name: "América del Sur",
        area: "17.8 millones km²",
        population: "430 millones",
        fun_facts: [
            "¡Tiene la selva más grande: el Amazonas!",
            "Las llamas y alpacas viven aquí.",
            "El río Amazonas es super ancho.",
            "¡Hay playas muy bonitas y montañas altas!",
        ],
        color: "#FFEAA7",
        icon: "🦙",
        position: [-0.6, -0.3, 0.7],
        animals: ["Llama", "Mono Araña", "Guacamayo", "Jaguar", "Caimán"],
    },
    ContinentRecord {
        name: "Oceanía",
        area: "8.6 millones km²",
        population: "45 millones",
        fun_facts: [
            "¡Australia es un país y un continente!",
            "Los canguros saltan muy alto.",
            "La Gran Barrera de Coral es de colores.",
            "¡Los koalas duermen 20 horas al día!",
        ],
        color: "#DDA0DD",
        icon: "🦘",
        position: [0.7, -0.4, -0.6],
        animals: ["Canguro", "Koala", "Cocodrilo Marino", "Ornitorrinco", "Casuario"],
    },
    ContinentRecord {
        name: "Antártida",
        area: "14.2 millones km²",
        population: "4.000 personas",
        fun_facts: [
            "¡Es el continente más frío del mundo!",
            "Los pingüinos son los dueños de aquí.",
            "Está cubierto de hielo todo el año.",
            "¡En invierno no sale el sol por meses!",
        ],
        color: "#000000ff",
        icon: "🐧",
        position: [0.0, -1.0, 0.0],
        animals: ["Pingüino Emperador", "Ballena", "Foca", "Krill", "Petrel"],
    },
];

pub fn continent(name: &str) -> Option<&'static ContinentRecord> {
    CONTINENTS.iter().find(|c| c.name == name)
}

pub fn continent_by_index(index: usize) -> Option<&'static ContinentRecord> {
    CONTINENTS.get(index)
}
