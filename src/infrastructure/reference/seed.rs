//! Built-in reference table of principal Colombian municipalities.
//!
//! Used when no reference file is configured. Codes are five-digit DANE codes.

use crate::domain::entities::AdminDivisionEntry;

const SEED: &[(&str, &str, &str)] = &[
    ("11001", "Bogotá", "Bogotá"),
    ("05001", "Medellín", "Antioquia"),
    ("05045", "Apartadó", "Antioquia"),
    ("05079", "Barbosa", "Antioquia"),
    ("05088", "Bello", "Antioquia"),
    ("05266", "Envigado", "Antioquia"),
    ("05360", "Itagüí", "Antioquia"),
    ("05615", "Rionegro", "Antioquia"),
    ("05631", "Sabaneta", "Antioquia"),
    ("08001", "Barranquilla", "Atlántico"),
    ("08433", "Malambo", "Atlántico"),
    ("08758", "Soledad", "Atlántico"),
    ("13001", "Cartagena de Indias", "Bolívar"),
    ("13430", "Magangué", "Bolívar"),
    ("15001", "Tunja", "Boyacá"),
    ("15238", "Duitama", "Boyacá"),
    ("15759", "Sogamoso", "Boyacá"),
    ("17001", "Manizales", "Caldas"),
    ("18001", "Florencia", "Caquetá"),
    ("19001", "Popayán", "Cauca"),
    ("20001", "Valledupar", "Cesar"),
    ("23001", "Montería", "Córdoba"),
    ("25175", "Chía", "Cundinamarca"),
    ("25269", "Facatativá", "Cundinamarca"),
    ("25290", "Fusagasugá", "Cundinamarca"),
    ("25307", "Girardot", "Cundinamarca"),
    ("25430", "Madrid", "Cundinamarca"),
    ("25473", "Mosquera", "Cundinamarca"),
    ("25754", "Soacha", "Cundinamarca"),
    ("25899", "Zipaquirá", "Cundinamarca"),
    ("27001", "Quibdó", "Chocó"),
    ("41001", "Neiva", "Huila"),
    ("44001", "Riohacha", "La Guajira"),
    ("47001", "Santa Marta", "Magdalena"),
    ("50001", "Villavicencio", "Meta"),
    ("52001", "Pasto", "Nariño"),
    ("52356", "Ipiales", "Nariño"),
    ("54001", "Cúcuta", "Norte de Santander"),
    ("63001", "Armenia", "Quindío"),
    ("66001", "Pereira", "Risaralda"),
    ("66170", "Dosquebradas", "Risaralda"),
    ("68001", "Bucaramanga", "Santander"),
    ("68077", "Barbosa", "Santander"),
    ("68081", "Barrancabermeja", "Santander"),
    ("68276", "Floridablanca", "Santander"),
    ("68307", "Girón", "Santander"),
    ("68547", "Piedecuesta", "Santander"),
    ("70001", "Sincelejo", "Sucre"),
    ("73001", "Ibagué", "Tolima"),
    ("76001", "Cali", "Valle del Cauca"),
    ("76109", "Buenaventura", "Valle del Cauca"),
    ("76111", "Guadalajara de Buga", "Valle del Cauca"),
    ("76147", "Cartago", "Valle del Cauca"),
    ("76364", "Jamundí", "Valle del Cauca"),
    ("76520", "Palmira", "Valle del Cauca"),
    ("76834", "Tuluá", "Valle del Cauca"),
    ("81001", "Arauca", "Arauca"),
    ("85001", "Yopal", "Casanare"),
    ("86001", "Mocoa", "Putumayo"),
    (
        "88001",
        "San Andrés",
        "Archipiélago de San Andrés, Providencia y Santa Catalina",
    ),
    ("91001", "Leticia", "Amazonas"),
    ("94001", "Inírida", "Guainía"),
    ("95001", "San José del Guaviare", "Guaviare"),
    ("97001", "Mitú", "Vaupés"),
    ("99001", "Puerto Carreño", "Vichada"),
];

/// Returns the built-in entries in table order.
#[must_use]
pub fn seed_entries() -> Vec<AdminDivisionEntry> {
    SEED.iter()
        .map(|(code, municipality, department)| {
            AdminDivisionEntry::new(*code, *municipality, *department)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::services::{AdminDivisionIndex, FuzzyCityResolver};
    use crate::domain::value_objects::MatchType;
    use std::collections::HashSet;

    #[test]
    fn codes_are_unique_and_well_formed() {
        let entries = seed_entries();
        let codes: HashSet<_> = entries
            .iter()
            .map(|e| e.canonical_code().as_str().to_string())
            .collect();
        assert_eq!(codes.len(), entries.len());
        assert!(
            codes
                .iter()
                .all(|c| c.len() == 5 && c.chars().all(|ch| ch.is_ascii_digit()))
        );
    }

    #[test]
    fn indexes_cleanly() {
        let index = AdminDivisionIndex::new(seed_entries()).unwrap();
        assert_eq!(index.len(), SEED.len());
    }

    #[test]
    fn misfiled_department_does_not_hide_fuzzy_match() {
        let index = AdminDivisionIndex::new(seed_entries()).unwrap();
        let resolver = FuzzyCityResolver::default();

        let resolution = resolver.resolve(&index, "Medelin", Some("Cundinamarca"));
        assert_eq!(resolution.report.match_type(), MatchType::Fuzzy);
        assert_eq!(resolution.code.as_str(), "05001");
        assert_eq!(resolution.report.matched_municipality(), Some("Medellín"));

        let resolution = resolver.resolve(&index, "Bogta", Some("Cundinamarca"));
        assert_eq!(resolution.report.match_type(), MatchType::Fuzzy);
        assert_eq!(resolution.code.as_str(), "11001");
    }
}
