//! Shared domain models.

use serde::{Deserialize, Serialize};

/// Highest value a rating score is expected to take.
pub const MAX_RATING_SCORE: f32 = 5.0;

const FILLED_STAR: char = '★';
const EMPTY_STAR: char = '☆';

/// A single entry of the game catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    /// Stable identifier, unique across the catalog.
    pub id: u32,
    /// Display name and search key.
    #[serde(default)]
    pub name: String,
    /// Platform the game ships on (e.g. `Switch`).
    #[serde(default)]
    pub platform: String,
    /// Genre label.
    #[serde(default)]
    pub genre: String,
    /// Release date as supplied by the data source.
    #[serde(default)]
    pub release_date: String,
    /// Age rating label (e.g. `E10+`).
    #[serde(default)]
    pub rating: String,
    /// Studio credit.
    #[serde(default)]
    pub developer: String,
    /// Review score, expected between 0 and 5.
    #[serde(default)]
    pub rating_score: f32,
    /// Reference to the cover art asset.
    #[serde(default)]
    pub image: Option<String>,
}

impl GameRecord {
    /// Build a record with only an id and a name; descriptive fields stay empty.
    pub fn named(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            platform: String::new(),
            genre: String::new(),
            release_date: String::new(),
            rating: String::new(),
            developer: String::new(),
            rating_score: 0.0,
            image: None,
        }
    }

    /// Returns `platform · genre`, skipping whichever part is empty.
    pub fn subtitle(&self) -> Option<String> {
        let parts: Vec<&str> = [self.platform.as_str(), self.genre.as_str()]
            .into_iter()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" · "))
        }
    }

    /// Rating score clamped into `0..=MAX_RATING_SCORE`.
    pub fn clamped_score(&self) -> f32 {
        if self.rating_score.is_nan() {
            return 0.0;
        }
        self.rating_score.clamp(0.0, MAX_RATING_SCORE)
    }

    /// Five-glyph star bar, rounding the score to the nearest whole star.
    pub fn rating_stars(&self) -> String {
        let total = MAX_RATING_SCORE as usize;
        let filled = (self.clamped_score().round() as usize).min(total);
        let mut stars = String::with_capacity(total * FILLED_STAR.len_utf8());
        stars.extend(std::iter::repeat(FILLED_STAR).take(filled));
        stars.extend(std::iter::repeat(EMPTY_STAR).take(total - filled));
        stars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_fields() -> anyhow::Result<()> {
        let game: GameRecord = serde_json::from_str(
            r#"{
                "id": 7,
                "name": "Metroid Dread",
                "platform": "Switch",
                "genre": "Action",
                "releaseDate": "2021-10-08",
                "rating": "T",
                "developer": "MercurySteam",
                "ratingScore": 4.5,
                "image": "metroid_dread.png"
            }"#,
        )?;
        assert_eq!(game.id, 7);
        assert_eq!(game.release_date, "2021-10-08");
        assert_eq!(game.rating_score, 4.5);
        assert_eq!(game.image.as_deref(), Some("metroid_dread.png"));
        Ok(())
    }

    #[test]
    fn missing_name_becomes_empty() -> anyhow::Result<()> {
        let game: GameRecord = serde_json::from_str(r#"{ "id": 1 }"#)?;
        assert!(game.name.is_empty());
        assert_eq!(game.subtitle(), None);
        Ok(())
    }

    #[test]
    fn stars_round_and_clamp() {
        let mut game = GameRecord::named(1, "Zelda");
        game.rating_score = 4.6;
        assert_eq!(game.rating_stars(), "★★★★★");
        game.rating_score = 2.2;
        assert_eq!(game.rating_stars(), "★★☆☆☆");
        game.rating_score = 11.0;
        assert_eq!(game.rating_stars(), "★★★★★");
        game.rating_score = -3.0;
        assert_eq!(game.rating_stars(), "☆☆☆☆☆");
    }

    #[test]
    fn subtitle_joins_non_empty_parts() {
        let mut game = GameRecord::named(1, "Zelda");
        game.platform = "Switch".to_string();
        assert_eq!(game.subtitle().as_deref(), Some("Switch"));
        game.genre = "Adventure".to_string();
        assert_eq!(game.subtitle().as_deref(), Some("Switch · Adventure"));
    }
}
