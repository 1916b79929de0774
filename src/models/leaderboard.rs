use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// What the app submits: a display name and the score at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
}

impl LeaderboardEntry {
    pub fn new(name: &str, score: u64) -> Self {
        Self {
            name: name.to_string(),
            score,
        }
    }
}

/// One raw row of the external table. The score cell is kept as text because
/// the store does not enforce a column type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub name: String,
    #[serde(
        deserialize_with = "deserialize_score_cell",
        serialize_with = "serialize_score_cell",
        default
    )]
    pub score: String,
}

impl LeaderboardRow {
    pub fn new(name: &str, score: &str) -> Self {
        Self {
            name: name.to_string(),
            score: score.to_string(),
        }
    }

    /// Numeric value of the score cell, or `None` if it cannot be read as a
    /// finite number.
    pub fn numeric_score(&self) -> Option<f64> {
        let value: f64 = self.score.trim().parse().ok()?;
        value.is_finite().then_some(value)
    }
}

impl From<&LeaderboardEntry> for LeaderboardRow {
    fn from(entry: &LeaderboardEntry) -> Self {
        Self {
            name: entry.name.clone(),
            score: entry.score.to_string(),
        }
    }
}

fn deserialize_score_cell<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

#[allow(clippy::ptr_arg)]
fn serialize_score_cell<S>(score: &String, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if let Ok(int) = score.trim().parse::<i64>() {
        return serializer.serialize_i64(int);
    }
    match score.trim().parse::<f64>() {
        Ok(float) if float.is_finite() => serializer.serialize_f64(float),
        _ => serializer.serialize_str(score),
    }
}

/// One displayed leaderboard line. `score` is `None` for rows whose cell
/// could not be coerced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub rank: usize,
    pub name: String,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Fetched,
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Standings {
    pub rows: Vec<Standing>,
    pub availability: Availability,
}

impl Standings {
    pub fn is_available(&self) -> bool {
        self.availability == Availability::Fetched
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
