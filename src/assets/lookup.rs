use std::collections::BTreeMap;

/// Relative path or URL of an externally-managed asset.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AssetRef(pub String);

impl AssetRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Pure name-to-asset mapping with forgiving key normalization.
///
/// Keys are matched case-insensitively and ignoring punctuation, so
/// "Brighton & Hove Albion" and "brighton hove albion" resolve alike.
#[derive(Clone, Debug, Default)]
pub struct AssetIndex {
    entries: BTreeMap<String, AssetRef>,
}

impl AssetIndex {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut idx = Self::default();
        for (key, path) in entries {
            idx.insert(key, AssetRef::new(path));
        }
        idx
    }

    pub fn insert(&mut self, key: &str, asset: AssetRef) {
        self.entries.insert(normalize_key(key), asset);
    }

    pub fn lookup(&self, key: &str) -> Option<&AssetRef> {
        self.entries.get(&normalize_key(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut pending_space = false;
    for c in key.chars() {
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.extend(c.to_lowercase());
        } else {
            pending_space = true;
        }
    }
    out
}

/// Club badge lookup preloaded with the clubs the stock data files cover.
pub fn club_logo_index() -> AssetIndex {
    AssetIndex::from_entries([
        ("AFC Bournemouth", "logos/afc_bournemouth.png"),
        ("Arsenal FC", "logos/arsenal_fc.png"),
        ("Aston Villa", "logos/aston_villa.png"),
        ("Brentford FC", "logos/brentford_fc.png"),
        ("Brighton & Hove Albion", "logos/brighton_hove_albion.png"),
        ("Chelsea FC", "logos/chelsea_fc.png"),
        ("Crystal Palace", "logos/crystal_palace.png"),
        ("Everton FC", "logos/everton_fc.png"),
        ("Fulham FC", "logos/fulham_fc.png"),
        ("Ipswich Town", "logos/ipswich_town.png"),
        ("Leicester City", "logos/leicester_city.png"),
        ("Liverpool FC", "logos/liverpool_fc.png"),
        ("Manchester City", "logos/manchester_city.png"),
        ("Manchester United", "logos/manchester_united.png"),
        ("Newcastle United", "logos/newcastle_united.png"),
        ("Nottingham Forest", "logos/nottingham_forest.png"),
        ("Southampton FC", "logos/southampton_fc.png"),
        ("Tottenham Hotspur", "logos/tottenham_hotspur.png"),
        ("West Ham United", "logos/west_ham_united.png"),
        ("Wolverhampton Wanderers", "logos/wolverhampton_wanderers.png"),
    ])
}

/// Federation nation code to ISO 3166-1 flag code.
///
/// Football data uses FIFA trigrams; flag assets key on ISO codes (plus the
/// GB subdivision codes for the home nations). Unknown trigrams fall through
/// to `None` and the renderer shows a generic globe.
#[derive(Clone, Debug)]
pub struct CountryCodeIndex {
    map: BTreeMap<&'static str, &'static str>,
}

impl Default for CountryCodeIndex {
    fn default() -> Self {
        let map = BTreeMap::from([
            ("ALG", "dz"),
            ("ARG", "ar"),
            ("AUS", "au"),
            ("AUT", "at"),
            ("BEL", "be"),
            ("BRA", "br"),
            ("CHI", "cl"),
            ("CIV", "ci"),
            ("CMR", "cm"),
            ("COL", "co"),
            ("CRO", "hr"),
            ("CZE", "cz"),
            ("DEN", "dk"),
            ("EGY", "eg"),
            ("ENG", "gb-eng"),
            ("ESP", "es"),
            ("FRA", "fr"),
            ("GER", "de"),
            ("GHA", "gh"),
            ("GRE", "gr"),
            ("IRL", "ie"),
            ("ISL", "is"),
            ("ITA", "it"),
            ("JAM", "jm"),
            ("JPN", "jp"),
            ("KOR", "kr"),
            ("MAR", "ma"),
            ("MEX", "mx"),
            ("NED", "nl"),
            ("NGA", "ng"),
            ("NIR", "gb-nir"),
            ("NOR", "no"),
            ("POL", "pl"),
            ("POR", "pt"),
            ("RSA", "za"),
            ("SCO", "gb-sct"),
            ("SEN", "sn"),
            ("SRB", "rs"),
            ("SUI", "ch"),
            ("SWE", "se"),
            ("TUR", "tr"),
            ("UKR", "ua"),
            ("URU", "uy"),
            ("USA", "us"),
            ("WAL", "gb-wls"),
        ]);
        Self { map }
    }
}

impl CountryCodeIndex {
    /// Resolve a nation code to a flag code. Two-letter inputs are assumed
    /// to already be ISO and pass through lowercased.
    pub fn lookup(&self, code: &str) -> Option<String> {
        let trimmed = code.trim();
        if let Some(iso) = self.map.get(trimmed.to_ascii_uppercase().as_str()) {
            return Some((*iso).to_string());
        }
        if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Some(trimmed.to_ascii_lowercase());
        }
        None
    }
}

/// Deterministic stand-in portrait for records without an image, keyed on
/// rank so the same roster always gets the same faces.
pub fn fallback_avatar_url(rank: u32) -> String {
    format!("https://i.pravatar.cc/400?img={}", (rank % 70) + 1)
}

/// Initials avatar the renderer swaps in when a portrait fails to load.
pub fn error_avatar_url(name: &str) -> String {
    let encoded: String = name
        .trim()
        .chars()
        .map(|c| if c == ' ' { '+' } else { c })
        .collect();
    format!("https://ui-avatars.com/api/?name={encoded}&background=random&size=256")
}

/// Fixed relative paths for the non-data assets a render references.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StaticAssets {
    pub background: AssetRef,
    pub card_header: AssetRef,
    pub audio_track: AssetRef,
    pub outro_clip: AssetRef,
}

impl Default for StaticAssets {
    fn default() -> Self {
        Self {
            background: AssetRef::new("background/grass.jpg"),
            card_header: AssetRef::new("background/grass_mini.jpg"),
            audio_track: AssetRef::new("_audio/parzival_william_rosati.mp3"),
            outro_clip: AssetRef::new("_audio/outro.mp4"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_normalizes_case_and_punctuation() {
        let logos = club_logo_index();
        assert!(logos.lookup("Manchester City").is_some());
        assert!(logos.lookup("manchester city").is_some());
        assert_eq!(
            logos.lookup("Brighton & Hove Albion"),
            logos.lookup("brighton hove albion")
        );
        assert!(logos.lookup("Real Madrid").is_none());
    }

    #[test]
    fn country_codes_map_home_nations_and_iso() {
        let idx = CountryCodeIndex::default();
        assert_eq!(idx.lookup("ENG").as_deref(), Some("gb-eng"));
        assert_eq!(idx.lookup("ger").as_deref(), Some("de"));
        assert_eq!(idx.lookup("BR").as_deref(), Some("br"));
        assert_eq!(idx.lookup("???"), None);
    }

    #[test]
    fn avatar_fallback_is_deterministic() {
        assert_eq!(fallback_avatar_url(3), "https://i.pravatar.cc/400?img=4");
        assert_eq!(fallback_avatar_url(71), "https://i.pravatar.cc/400?img=2");
        assert_eq!(fallback_avatar_url(3), fallback_avatar_url(3));
    }

    #[test]
    fn error_avatar_encodes_the_name() {
        let url = error_avatar_url("Eric Brook");
        assert!(url.starts_with("https://ui-avatars.com/api/?name=Eric+Brook"));
    }
}
