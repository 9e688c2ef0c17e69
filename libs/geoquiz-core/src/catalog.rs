//! Fixed location catalogs: German federal states, neighboring countries,
//! cities and rivers. Built once at first use, read-only afterwards.
//!
//! Region keys mirror the map asset: ISO-style path ids for states and
//! countries, `city-*` marker ids for cities, `wasser-N` path ids for rivers.

use crate::types::{AnswerTarget, Location, Point};
use std::sync::OnceLock;

fn region(id: &str, name: &str, capital: &str, region_key: &str) -> Location {
    Location {
        id: id.to_string(),
        name: name.to_string(),
        capital: Some(capital.to_string()),
        target: AnswerTarget::Region {
            region_keys: vec![region_key.to_string()],
        },
    }
}

fn city(id: &str, name: &str, x: f64, y: f64) -> Location {
    Location {
        id: id.to_string(),
        name: name.to_string(),
        capital: None,
        target: AnswerTarget::Point {
            region_key: format!("city-{id}"),
            coordinates: Point::new(x, y),
        },
    }
}

fn river(id: &str, name: &str, path_indices: &[u32]) -> Location {
    Location {
        id: id.to_string(),
        name: name.to_string(),
        capital: None,
        target: AnswerTarget::Region {
            region_keys: path_indices.iter().map(|i| format!("wasser-{i}")).collect(),
        },
    }
}

/// The 16 German federal states with their capitals.
pub fn federal_states() -> &'static [Location] {
    static STATES: OnceLock<Vec<Location>> = OnceLock::new();
    STATES.get_or_init(|| {
        vec![
            region("bw", "Baden-Württemberg", "Stuttgart", "DE-BW"),
            region("by", "Bayern", "München", "DE-BY"),
            region("be", "Berlin", "Berlin", "DE-BE"),
            region("bb", "Brandenburg", "Potsdam", "DE-BB"),
            region("hb", "Bremen", "Bremen", "DE-HB"),
            region("hh", "Hamburg", "Hamburg", "DE-HH"),
            region("he", "Hessen", "Wiesbaden", "DE-HE"),
            region("mv", "Mecklenburg-Vorpommern", "Schwerin", "DE-MV"),
            region("ni", "Niedersachsen", "Hannover", "DE-NI"),
            region("nw", "Nordrhein-Westfalen", "Düsseldorf", "DE-NW"),
            region("rp", "Rheinland-Pfalz", "Mainz", "DE-RP"),
            region("sl", "Saarland", "Saarbrücken", "DE-SL"),
            region("sn", "Sachsen", "Dresden", "DE-SN"),
            region("st", "Sachsen-Anhalt", "Magdeburg", "DE-ST"),
            region("sh", "Schleswig-Holstein", "Kiel", "DE-SH"),
            region("th", "Thüringen", "Erfurt", "DE-TH"),
        ]
    })
}

/// The 9 countries bordering Germany, with their capitals.
pub fn neighboring_countries() -> &'static [Location] {
    static COUNTRIES: OnceLock<Vec<Location>> = OnceLock::new();
    COUNTRIES.get_or_init(|| {
        vec![
            region("dk", "Dänemark", "Kopenhagen", "DK"),
            region("nl", "Niederlande", "Amsterdam", "NL"),
            // "bel" rather than ISO "be", which is taken by the state Berlin
            region("bel", "Belgien", "Brüssel", "BE"),
            region("lu", "Luxemburg", "Luxemburg", "LU"),
            region("fr", "Frankreich", "Paris", "FR"),
            region("ch", "Schweiz", "Bern", "CH"),
            region("at", "Österreich", "Wien", "AT"),
            region("cz", "Tschechien", "Prag", "CZ"),
            region("pl", "Polen", "Warschau", "PL"),
        ]
    })
}

/// The 16 state capitals plus 4 major cities, with map marker coordinates.
pub fn cities() -> &'static [Location] {
    static CITIES: OnceLock<Vec<Location>> = OnceLock::new();
    CITIES.get_or_init(|| {
        vec![
            city("stuttgart", "Stuttgart", 500.0, 650.0),
            city("muenchen", "München", 650.0, 700.0),
            city("berlin", "Berlin", 700.0, 300.0),
            city("potsdam", "Potsdam", 680.0, 310.0),
            city("bremen", "Bremen", 450.0, 250.0),
            city("hamburg", "Hamburg", 500.0, 200.0),
            city("wiesbaden", "Wiesbaden", 420.0, 500.0),
            city("schwerin", "Schwerin", 600.0, 200.0),
            city("hannover", "Hannover", 500.0, 320.0),
            city("duesseldorf", "Düsseldorf", 350.0, 420.0),
            city("mainz", "Mainz", 420.0, 520.0),
            city("saarbruecken", "Saarbrücken", 350.0, 600.0),
            city("dresden", "Dresden", 700.0, 450.0),
            city("magdeburg", "Magdeburg", 600.0, 330.0),
            city("kiel", "Kiel", 500.0, 120.0),
            city("erfurt", "Erfurt", 550.0, 450.0),
            city("frankfurt", "Frankfurt am Main", 450.0, 500.0),
            city("koeln", "Köln", 350.0, 450.0),
            city("leipzig", "Leipzig", 650.0, 400.0),
            city("nuernberg", "Nürnberg", 550.0, 600.0),
        ]
    })
}

/// Rivers and lakes. Several span more than one map path.
pub fn rivers() -> &'static [Location] {
    static RIVERS: OnceLock<Vec<Location>> = OnceLock::new();
    RIVERS.get_or_init(|| {
        vec![
            river("aller", "Aller", &[4]),
            river("chiemsee", "Chiemsee", &[49]),
            river("donau", "Donau", &[38, 46]),
            river("elbe", "Elbe", &[11, 12]),
            river("ems", "Ems", &[1]),
            river("fulda", "Fulda", &[0]),
            river("havel", "Havel", &[13, 14, 15, 16, 18, 19, 20, 21, 51, 53]),
            river("ijssel", "IJssel", &[45]),
            river("inn", "Inn", &[39]),
            river("lippe", "Lippe", &[6]),
            river("maas", "Maas", &[44]),
            river("main", "Main", &[32]),
            river("moldau", "Moldau", &[7, 8]),
            river("mosel", "Mosel", &[42]),
            river("neckar", "Neckar", &[47]),
            river("oder", "Oder", &[22, 23, 52]),
            river("rhein", "Rhein", &[10, 40, 41]),
            river("ruhr", "Ruhr", &[35]),
            river("saale", "Saale", &[2, 3, 5]),
            river("schwerinersee", "Schweriner See", &[50]),
            river("spree", "Spree", &[17, 25, 26, 27, 28]),
            river("warthe", "Warthe", &[9]),
            river("werra", "Werra", &[33]),
            river("weser", "Weser", &[34]),
        ]
    })
}

/// Find a location by id (exact match).
pub fn find_by_id<'a>(locations: &'a [Location], id: &str) -> Option<&'a Location> {
    locations.iter().find(|loc| loc.id == id)
}

/// Find a location by name (case-insensitive exact match).
pub fn find_by_name<'a>(locations: &'a [Location], name: &str) -> Option<&'a Location> {
    locations
        .iter()
        .find(|loc| loc.name.to_lowercase() == name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn catalog_sizes() {
        assert_eq!(federal_states().len(), 16);
        assert_eq!(neighboring_countries().len(), 9);
        assert_eq!(cities().len(), 20);
        assert_eq!(rivers().len(), 24);
    }

    #[test]
    fn ids_are_unique_across_all_catalogs() {
        let mut seen = HashSet::new();
        for loc in federal_states()
            .iter()
            .chain(neighboring_countries())
            .chain(cities())
            .chain(rivers())
        {
            assert!(seen.insert(loc.id.as_str()), "duplicate id {}", loc.id);
        }
    }

    #[test]
    fn region_catalogs_all_carry_capitals() {
        for loc in federal_states().iter().chain(neighboring_countries()) {
            assert!(loc.capital.is_some(), "{} has no capital", loc.name);
        }
    }

    #[test]
    fn place_catalogs_carry_no_capitals() {
        for loc in cities().iter().chain(rivers()) {
            assert!(loc.capital.is_none(), "{} should not have a capital", loc.name);
        }
    }

    #[test]
    fn every_location_has_at_least_one_region_key() {
        for loc in federal_states()
            .iter()
            .chain(neighboring_countries())
            .chain(cities())
            .chain(rivers())
        {
            assert!(!loc.region_keys().is_empty(), "{} has no region key", loc.id);
        }
    }

    #[test]
    fn rivers_may_span_multiple_paths() {
        let havel = find_by_id(rivers(), "havel").expect("havel");
        assert_eq!(havel.region_keys().len(), 10);
    }

    #[test]
    fn lookup_by_id_and_name() {
        let bayern = find_by_id(federal_states(), "by").expect("by");
        assert_eq!(bayern.name, "Bayern");
        let bayern_again = find_by_name(federal_states(), "bayern").expect("bayern");
        assert_eq!(bayern_again.id, "by");
        assert!(find_by_id(federal_states(), "zz").is_none());
    }

    #[test]
    fn distinct_capitals_never_cross_match() {
        use crate::matching::compare_text;
        let locations: Vec<_> = federal_states()
            .iter()
            .chain(neighboring_countries())
            .collect();
        for a in &locations {
            for b in &locations {
                let (ca, cb) = (a.capital.as_deref().unwrap(), b.capital.as_deref().unwrap());
                if ca != cb {
                    assert!(!compare_text(ca, cb), "{ca} matched {cb}");
                }
            }
        }
    }
}
