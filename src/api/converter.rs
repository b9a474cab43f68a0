//! Data conversion utilities for score feed responses.

use crate::betting::{Competitor, CompetitorSide, GameStatus, Score, ScoreSnapshot};
use crate::error::FeedError;
use serde::Deserialize;

/// Score feed response body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub event_id: u64,
    pub latest_score: LatestScore,
    pub event_description: String,
    pub competitors: Vec<WireCompetitor>,
    pub game_status: String,
}

/// Scores arrive as decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestScore {
    pub home: String,
    pub visitor: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCompetitor {
    pub name: String,
    pub home_or_visitor: String,
}

/// Converts feed responses to internal snapshot types.
pub struct DataConverter;

impl DataConverter {
    /// Decode a response body into a snapshot.
    pub fn decode_snapshot(body: &str) -> Result<ScoreSnapshot, FeedError> {
        let response: ScoreResponse =
            serde_json::from_str(body).map_err(|e| FeedError::decode(e.to_string()))?;
        Ok(Self::convert_snapshot(response))
    }

    /// Convert a decoded response to our internal snapshot type.
    pub fn convert_snapshot(response: ScoreResponse) -> ScoreSnapshot {
        ScoreSnapshot {
            event_id: response.event_id,
            score: Score {
                home: Self::parse_points(&response.latest_score.home),
                away: Self::parse_points(&response.latest_score.visitor),
            },
            game_status: GameStatus::from_wire(&response.game_status),
            description: response.event_description,
            competitors: response
                .competitors
                .into_iter()
                .map(Self::convert_competitor)
                .collect(),
        }
    }

    fn convert_competitor(competitor: WireCompetitor) -> Competitor {
        Competitor {
            name: competitor.name,
            side: Self::convert_side(&competitor.home_or_visitor),
        }
    }

    fn convert_side(side: &str) -> CompetitorSide {
        match side {
            "home" => CompetitorSide::Home,
            "visitor" => CompetitorSide::Visitor,
            _ => CompetitorSide::Unknown,
        }
    }

    /// Parse a score string. Anything that is not an integer becomes `None`.
    fn parse_points(raw: &str) -> Option<i64> {
        raw.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedErrorKind;
    use pretty_assertions::assert_eq;

    const FINAL_BODY: &str = r#"{
        "eventId": 8675309,
        "latestScore": {"home": "24", "visitor": "20"},
        "eventDescription": "Visitors @ Hosts",
        "competitors": [
            {"name": "Visitors", "homeOrVisitor": "visitor"},
            {"name": "Hosts", "homeOrVisitor": "home"}
        ],
        "gameStatus": "GAME_END"
    }"#;

    #[test]
    fn test_decode_final_score() {
        let snap = DataConverter::decode_snapshot(FINAL_BODY).unwrap();
        assert_eq!(
            snap,
            ScoreSnapshot {
                event_id: 8675309,
                score: Score::new(24, 20),
                game_status: GameStatus::GameEnd,
                description: "Visitors @ Hosts".to_string(),
                competitors: vec![
                    Competitor {
                        name: "Visitors".to_string(),
                        side: CompetitorSide::Visitor,
                    },
                    Competitor {
                        name: "Hosts".to_string(),
                        side: CompetitorSide::Home,
                    },
                ],
            }
        );
    }

    #[test]
    fn test_non_numeric_score_is_missing() {
        let body = FINAL_BODY.replace(r#""home": "24""#, r#""home": "--""#);
        let snap = DataConverter::decode_snapshot(&body).unwrap();
        assert_eq!(snap.score.home, None);
        assert_eq!(snap.score.away, Some(20));
    }

    #[test]
    fn test_unknown_status_and_side_are_kept() {
        let body = FINAL_BODY
            .replace("GAME_END", "SUSPENDED")
            .replace(r#""homeOrVisitor": "visitor""#, r#""homeOrVisitor": "neutral""#);
        let snap = DataConverter::decode_snapshot(&body).unwrap();
        assert_eq!(snap.game_status, GameStatus::Other("SUSPENDED".to_string()));
        assert_eq!(snap.competitors[0].side, CompetitorSide::Unknown);
    }

    #[test]
    fn test_wrong_shape_is_decode_error() {
        let err = DataConverter::decode_snapshot(r#"{"eventId": 1}"#).unwrap_err();
        assert_eq!(err.kind, FeedErrorKind::Decode);

        let err = DataConverter::decode_snapshot("<html>busy</html>").unwrap_err();
        assert_eq!(err.kind, FeedErrorKind::Decode);
    }
}
