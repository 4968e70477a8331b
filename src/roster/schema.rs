use std::collections::HashSet;
use std::fmt;

use serde_json::Value;

/// One validated roster entry. Field names mirror the JSON data contract.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerRecord {
    pub rank: u32,
    pub name: String,
    pub image_url: String,
    pub appearances: u32,
    pub goals: u32,
    pub assists: u32,
    pub nation: String,
    pub nation_code: String,
    pub club: String,
    pub date_of_birth: String,
    pub position: String,
    #[serde(default)]
    pub jersey_name: Option<String>,
    pub minutes_played: u32,
    pub period: String,
}

impl PlayerRecord {
    /// Short name for the card headline: jersey name when set, otherwise the
    /// last word of the full name.
    pub fn display_name(&self) -> &str {
        match self.jersey_name.as_deref() {
            Some(j) if !j.trim().is_empty() => j,
            _ => self.name.split_whitespace().last().unwrap_or(&self.name),
        }
    }

    /// Portrait URL with a deterministic generated-avatar fallback for
    /// records that carry no image.
    pub fn portrait_url(&self) -> String {
        if !self.image_url.trim().is_empty() {
            return self.image_url.clone();
        }
        crate::assets::lookup::fallback_avatar_url(self.rank)
    }

    pub fn minutes_display(&self) -> String {
        if self.minutes_played == 0 {
            return "N/A".to_string();
        }
        group_thousands(self.minutes_played)
    }

    pub fn birthday_display(&self) -> &str {
        if self.date_of_birth.trim().is_empty() {
            "N/A"
        } else {
            &self.date_of_birth
        }
    }

    pub fn position_display(&self) -> &str {
        if self.position.trim().is_empty() {
            "Midfielder"
        } else {
            &self.position
        }
    }
}

fn group_thousands(v: u32) -> String {
    let digits = v.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaPathElem {
    Field(&'static str),
    Index(usize),
}

/// A single schema violation, addressed by a `$[i].field` style path.
#[derive(Debug, Clone)]
pub struct SchemaError {
    pub path: Vec<SchemaPathElem>,
    pub message: String,
}

impl SchemaError {
    fn at(path: &[SchemaPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            SchemaPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

/// All violations found in a roster document, one per line in `Display`.
#[derive(Debug, Clone)]
pub struct SchemaErrors {
    pub errors: Vec<SchemaError>,
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

/// Validate a raw JSON document against the roster schema.
///
/// All-or-nothing: any violation anywhere in the array fails the whole
/// roster. Errors are collected across elements so a bad file reports every
/// offending path at once, but no partial record list is ever returned.
pub fn validate_roster(raw: &Value) -> Result<Vec<PlayerRecord>, SchemaErrors> {
    let mut errors = Vec::new();

    let Some(items) = raw.as_array() else {
        errors.push(SchemaError::at(&[], "roster document must be a JSON array"));
        return Err(SchemaErrors { errors });
    };

    let mut records = Vec::with_capacity(items.len());
    let mut seen_ranks = HashSet::<u32>::new();

    for (i, item) in items.iter().enumerate() {
        let path = [SchemaPathElem::Index(i)];
        match validate_player(item, &path, &mut errors) {
            Some(rec) => {
                if !seen_ranks.insert(rec.rank) {
                    errors.push(SchemaError::at(
                        &[SchemaPathElem::Index(i), SchemaPathElem::Field("rank")],
                        format!("duplicate rank {}", rec.rank),
                    ));
                }
                records.push(rec);
            }
            None => {
                // Field errors already recorded; keep scanning for diagnostics.
            }
        }
    }

    if errors.is_empty() {
        Ok(records)
    } else {
        Err(SchemaErrors { errors })
    }
}

fn validate_player(
    item: &Value,
    path: &[SchemaPathElem],
    errors: &mut Vec<SchemaError>,
) -> Option<PlayerRecord> {
    let Some(obj) = item.as_object() else {
        errors.push(SchemaError::at(path, "roster entry must be a JSON object"));
        return None;
    };

    let before = errors.len();

    let rank = req_uint(obj, "rank", path, errors);
    if let Some(0) = rank {
        errors.push(SchemaError::at(
            &join(path, "rank"),
            "rank must be a positive integer",
        ));
    }

    let name = req_string(obj, "name", path, errors);
    let image_url = req_string(obj, "image_url", path, errors);
    if let Some(url) = image_url.as_deref()
        && !is_well_formed_url(url)
    {
        errors.push(SchemaError::at(
            &join(path, "image_url"),
            format!("not a well-formed http(s) URL: \"{url}\""),
        ));
    }

    let appearances = req_uint(obj, "appearances", path, errors);
    let goals = req_uint(obj, "goals", path, errors);
    let assists = req_uint(obj, "assists", path, errors);
    let nation = req_string(obj, "nation", path, errors);
    let nation_code = req_string(obj, "nation_code", path, errors);
    let club = req_string(obj, "club", path, errors);
    let date_of_birth = req_string(obj, "date_of_birth", path, errors);
    let position = req_string(obj, "position", path, errors);
    let jersey_name = opt_string(obj, "jersey_name", path, errors);
    let minutes_played = req_uint(obj, "minutes_played", path, errors);
    let period = req_string(obj, "period", path, errors);

    if errors.len() > before {
        return None;
    }

    Some(PlayerRecord {
        rank: rank?,
        name: name?,
        image_url: image_url?,
        appearances: appearances?,
        goals: goals?,
        assists: assists?,
        nation: nation?,
        nation_code: nation_code?,
        club: club?,
        date_of_birth: date_of_birth?,
        position: position?,
        jersey_name,
        minutes_played: minutes_played?,
        period: period?,
    })
}

fn join(path: &[SchemaPathElem], field: &'static str) -> Vec<SchemaPathElem> {
    let mut p = path.to_vec();
    p.push(SchemaPathElem::Field(field));
    p
}

fn req_string(
    obj: &serde_json::Map<String, Value>,
    field: &'static str,
    path: &[SchemaPathElem],
    errors: &mut Vec<SchemaError>,
) -> Option<String> {
    match obj.get(field) {
        None => {
            errors.push(SchemaError::at(&join(path, field), "required field is missing"));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            errors.push(SchemaError::at(
                &join(path, field),
                format!("expected a string, got {}", type_name(other)),
            ));
            None
        }
    }
}

fn opt_string(
    obj: &serde_json::Map<String, Value>,
    field: &'static str,
    path: &[SchemaPathElem],
    errors: &mut Vec<SchemaError>,
) -> Option<String> {
    match obj.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            errors.push(SchemaError::at(
                &join(path, field),
                format!("expected a string, got {}", type_name(other)),
            ));
            None
        }
    }
}

fn req_uint(
    obj: &serde_json::Map<String, Value>,
    field: &'static str,
    path: &[SchemaPathElem],
    errors: &mut Vec<SchemaError>,
) -> Option<u32> {
    match obj.get(field) {
        None => {
            errors.push(SchemaError::at(&join(path, field), "required field is missing"));
            None
        }
        Some(Value::Number(n)) => match n.as_u64() {
            Some(v) if v <= u64::from(u32::MAX) => Some(v as u32),
            _ => {
                errors.push(SchemaError::at(
                    &join(path, field),
                    format!("expected a non-negative integer, got {n}"),
                ));
                None
            }
        },
        Some(other) => {
            errors.push(SchemaError::at(
                &join(path, field),
                format!("expected a non-negative integer, got {}", type_name(other)),
            ));
            None
        }
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Minimal URL shape check: http(s) scheme, a non-empty host, no whitespace.
fn is_well_formed_url(s: &str) -> bool {
    let rest = match s.strip_prefix("https://").or_else(|| s.strip_prefix("http://")) {
        Some(r) => r,
        None => return false,
    };
    let host = rest.split('/').next().unwrap_or("");
    !host.is_empty() && !s.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn player(rank: u32) -> Value {
        json!({
            "rank": rank,
            "name": "Alan Shearer",
            "image_url": "https://img.example.com/shearer.png",
            "appearances": 303,
            "goals": 206,
            "assists": 64,
            "nation": "England",
            "nation_code": "ENG",
            "club": "Newcastle United",
            "date_of_birth": "1970-08-13",
            "position": "Centre-Forward",
            "jersey_name": "Shearer",
            "minutes_played": 26_269,
            "period": "1996 - 2006",
        })
    }

    #[test]
    fn valid_roster_passes() {
        let raw = json!([player(1), player(2)]);
        let recs = validate_roster(&raw).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].rank, 1);
        assert_eq!(recs[0].goals, 206);
    }

    #[test]
    fn missing_field_fails_whole_array() {
        let mut bad = player(2);
        bad.as_object_mut().unwrap().remove("image_url");
        let raw = json!([player(1), bad, player(3)]);

        let err = validate_roster(&raw).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("$[1].image_url"), "got: {msg}");
        assert!(msg.contains("required field is missing"));
    }

    #[test]
    fn wrong_type_reports_path_and_type() {
        let mut bad = player(1);
        bad.as_object_mut().unwrap()["goals"] = json!("lots");
        let err = validate_roster(&json!([bad])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("$[0].goals"));
        assert!(msg.contains("expected a non-negative integer, got a string"));
    }

    #[test]
    fn negative_counts_are_rejected() {
        let mut bad = player(1);
        bad.as_object_mut().unwrap()["assists"] = json!(-3);
        assert!(validate_roster(&json!([bad])).is_err());
    }

    #[test]
    fn malformed_url_is_rejected() {
        let mut bad = player(1);
        bad.as_object_mut().unwrap()["image_url"] = json!("not a url");
        let err = validate_roster(&json!([bad])).unwrap_err();
        assert!(err.to_string().contains("well-formed http(s) URL"));
    }

    #[test]
    fn duplicate_ranks_are_rejected() {
        let err = validate_roster(&json!([player(1), player(1)])).unwrap_err();
        assert!(err.to_string().contains("duplicate rank 1"));
    }

    #[test]
    fn zero_rank_is_rejected() {
        let err = validate_roster(&json!([player(0)])).unwrap_err();
        assert!(err.to_string().contains("positive integer"));
    }

    #[test]
    fn jersey_name_is_optional() {
        let mut p = player(1);
        p.as_object_mut().unwrap().remove("jersey_name");
        let recs = validate_roster(&json!([p])).unwrap();
        assert_eq!(recs[0].jersey_name, None);
        assert_eq!(recs[0].display_name(), "Shearer");
    }

    #[test]
    fn non_array_document_fails() {
        let err = validate_roster(&json!({"players": []})).unwrap_err();
        assert!(err.to_string().contains("must be a JSON array"));
    }

    #[test]
    fn errors_collect_across_elements() {
        let mut a = player(1);
        a.as_object_mut().unwrap().remove("name");
        let mut b = player(2);
        b.as_object_mut().unwrap().remove("goals");
        let err = validate_roster(&json!([a, b])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("$[0].name"));
        assert!(msg.contains("$[1].goals"));
    }

    #[test]
    fn display_fallbacks() {
        let mut rec = validate_roster(&json!([player(1)])).unwrap().remove(0);
        rec.jersey_name = None;
        assert_eq!(rec.display_name(), "Shearer");
        rec.minutes_played = 0;
        assert_eq!(rec.minutes_display(), "N/A");
        rec.minutes_played = 26_269;
        assert_eq!(rec.minutes_display(), "26,269");
        rec.position = String::new();
        assert_eq!(rec.position_display(), "Midfielder");
        rec.date_of_birth = String::new();
        assert_eq!(rec.birthday_display(), "N/A");
    }
}
