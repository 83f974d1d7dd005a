//! Categories shipped inside the binary (from `data/`)

use super::{Category, CategorySource};

struct BundledCategory {
    id: &'static str,
    title: &'static str,
    key: &'static str,
    about: &'static str,
    json: &'static str,
}

const BUNDLED: &[BundledCategory] = &[
    BundledCategory {
        id: "beyblade",
        title: "Beyblade Names",
        key: "beybladeNames",
        about: "Every blader needs a top with a name worth shouting at the stadium. \
                These combine a striking element or adjective with a mythic beast or \
                constellation, the way the anime's signature beys do.",
        json: include_str!("../../data/beyblade.json"),
    },
    BundledCategory {
        id: "drow-half-elf",
        title: "D&D Drow Half-Elf Names",
        key: "drowHalfElfNames",
        about: "Half-drow characters carry names from two worlds. Pair a lilting \
                Underdark given name with a surface family name and you get someone \
                who belongs everywhere and nowhere.",
        json: include_str!("../../data/dnd-drow-half-elf.json"),
    },
    BundledCategory {
        id: "dnd-classes",
        title: "D&D Class & Subclass Names",
        key: "dndClassNames",
        about: "Homebrew subclasses live or die by their names. Each of these hints \
                at a theme and a fighting style you can build the features around.",
        json: include_str!("../../data/dnd-classes.json"),
    },
    BundledCategory {
        id: "splatoon-idols",
        title: "Splatoon Idol Group Names",
        key: "idolGroupNames",
        about: "Inkopolis runs on pop music. Use these for your own idol duos, \
                splatfest headliners or the band playing in the background of a turf war.",
        json: include_str!("../../data/splatoon-idol-groups.json"),
    },
    BundledCategory {
        id: "wow-night-elf",
        title: "World of Warcraft Night Elf Names",
        key: "nightElfNames",
        about: "Night elf names flow with soft consonants and long vowels, usually \
                paired with a surname drawn from the moon, the stars or the forest.",
        json: include_str!("../../data/wow-night-elf.json"),
    },
];

pub fn categories() -> Vec<Category> {
    BUNDLED
        .iter()
        .map(|b| Category {
            id: b.id.to_string(),
            title: b.title.to_string(),
            key: b.key.to_string(),
            about: b.about.to_string(),
            source: CategorySource::Bundled(b.json),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NameCollection;

    #[test]
    fn test_bundled_data_parses() {
        for category in categories() {
            let CategorySource::Bundled(json) = category.source else {
                panic!("{} should be bundled", category.id);
            };
            let collection = NameCollection::from_json(&category.key, json)
                .unwrap_or_else(|e| panic!("{}: {}", category.id, e));
            assert!(
                collection.len() >= 10,
                "{} has only {} entries",
                category.id,
                collection.len()
            );
        }
    }

    #[test]
    fn test_bundled_ids_unique() {
        let cats = categories();
        let mut ids: Vec<_> = cats.iter().map(|c| c.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), cats.len());
    }
}
