//! Upstream entity shapes.
//!
//! One shape declaration per documented TBA API response entity, mirrored
//! field-for-field from the upstream API docs. Fields the upstream is known
//! to sometimes omit (or send as explicit null) are optional. Open-ended
//! payloads such as score breakdowns and insight blobs are typed as opaque
//! pass-through values so season-specific structures can never cause
//! spurious validation failures.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::schema::{Field, Shape};

/// Named upstream entities with registered shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Team,
    TeamSimple,
    Event,
    EventSimple,
    Match,
    MatchSimple,
    Award,
    Ranking,
    Alliance,
    DistrictPoints,
    Insights,
    Media,
    Robot,
    District,
    Status,
    EventOprs,
    TeamEventStatus,
    DistrictRanking,
    Zebra,
    Prediction,
    TeamHistory,
}

impl Entity {
    /// Shape declaration for this entity.
    pub fn shape(self) -> &'static Shape {
        registry()
            .get(&self)
            .expect("every entity variant is registered")
    }
}

fn registry() -> &'static HashMap<Entity, Shape> {
    static REGISTRY: OnceLock<HashMap<Entity, Shape>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        HashMap::from([
            (Entity::Team, team()),
            (Entity::TeamSimple, team_simple()),
            (Entity::Event, event()),
            (Entity::EventSimple, event_simple()),
            (Entity::Match, match_full()),
            (Entity::MatchSimple, match_simple()),
            (Entity::Award, award()),
            (Entity::Ranking, ranking()),
            (Entity::Alliance, alliance()),
            (Entity::DistrictPoints, district_points()),
            (Entity::Insights, insights()),
            (Entity::Media, media()),
            (Entity::Robot, robot()),
            (Entity::District, district()),
            (Entity::Status, status()),
            (Entity::EventOprs, event_oprs()),
            (Entity::TeamEventStatus, team_event_status()),
            (Entity::DistrictRanking, district_ranking()),
            (Entity::Zebra, zebra()),
            (Entity::Prediction, prediction()),
            (Entity::TeamHistory, team_history()),
        ])
    })
}

fn obj(fields: Vec<Field>) -> Shape {
    Shape::Object(fields)
}

fn arr(element: Shape) -> Shape {
    Shape::Array(Box::new(element))
}

fn map(value: Shape) -> Shape {
    Shape::Map(Box::new(value))
}

/// Win-loss-tie record, reused across rankings and playoff statuses.
fn wlt_record() -> Shape {
    obj(vec![
        Field::required("losses", Shape::Number),
        Field::required("wins", Shape::Number),
        Field::required("ties", Shape::Number),
    ])
}

/// `{name, precision}` entries describing ranking sort columns.
fn sort_info() -> Shape {
    arr(obj(vec![
        Field::required("name", Shape::String),
        Field::required("precision", Shape::Number),
    ]))
}

fn team() -> Shape {
    obj(vec![
        Field::required("key", Shape::String),
        Field::required("team_number", Shape::Number),
        Field::optional("nickname", Shape::String),
        Field::required("name", Shape::String),
        Field::optional("city", Shape::String),
        Field::optional("state_prov", Shape::String),
        Field::optional("country", Shape::String),
        Field::optional("address", Shape::String),
        Field::optional("postal_code", Shape::String),
        Field::optional("gmaps_place_id", Shape::String),
        Field::optional("gmaps_url", Shape::String),
        Field::optional("lat", Shape::Number),
        Field::optional("lng", Shape::Number),
        Field::optional("location_name", Shape::String),
        Field::optional("website", Shape::String),
        Field::optional("rookie_year", Shape::Number),
        Field::optional("motto", Shape::String),
        Field::optional("home_championship", map(Shape::Any)),
    ])
}

fn team_simple() -> Shape {
    obj(vec![
        Field::required("key", Shape::String),
        Field::required("team_number", Shape::Number),
        Field::optional("nickname", Shape::String),
        Field::required("name", Shape::String),
        Field::optional("city", Shape::String),
        Field::optional("state_prov", Shape::String),
        Field::optional("country", Shape::String),
    ])
}

fn event() -> Shape {
    obj(vec![
        Field::required("key", Shape::String),
        Field::required("name", Shape::String),
        Field::required("event_code", Shape::String),
        Field::required("event_type", Shape::Number),
        Field::optional("district", district()),
        Field::optional("city", Shape::String),
        Field::optional("state_prov", Shape::String),
        Field::optional("country", Shape::String),
        Field::required("start_date", Shape::String),
        Field::required("end_date", Shape::String),
        Field::required("year", Shape::Number),
        Field::optional("short_name", Shape::String),
        Field::required("event_type_string", Shape::String),
        Field::optional("week", Shape::Number),
        Field::optional("address", Shape::String),
        Field::optional("postal_code", Shape::String),
        Field::optional("gmaps_place_id", Shape::String),
        Field::optional("gmaps_url", Shape::String),
        Field::optional("lat", Shape::Number),
        Field::optional("lng", Shape::Number),
        Field::optional("location_name", Shape::String),
        Field::optional("timezone", Shape::String),
        Field::optional("website", Shape::String),
        Field::optional("first_event_id", Shape::String),
        Field::optional("first_event_code", Shape::String),
        Field::optional(
            "webcasts",
            arr(obj(vec![
                Field::required("type", Shape::String),
                Field::required("channel", Shape::String),
                Field::optional("date", Shape::String),
                Field::optional("file", Shape::String),
            ])),
        ),
        Field::optional("division_keys", arr(Shape::String)),
        Field::optional("parent_event_key", Shape::String),
        Field::optional("playoff_type", Shape::Number),
        Field::optional("playoff_type_string", Shape::String),
    ])
}

fn event_simple() -> Shape {
    obj(vec![
        Field::required("key", Shape::String),
        Field::required("name", Shape::String),
        Field::required("event_code", Shape::String),
        Field::required("event_type", Shape::Number),
        Field::optional("city", Shape::String),
        Field::optional("state_prov", Shape::String),
        Field::optional("country", Shape::String),
        Field::required("start_date", Shape::String),
        Field::required("end_date", Shape::String),
        Field::required("year", Shape::Number),
    ])
}

fn match_alliance() -> Shape {
    obj(vec![
        Field::required("score", Shape::Number),
        Field::required("team_keys", arr(Shape::String)),
        Field::optional("surrogate_team_keys", arr(Shape::String)),
        Field::optional("dq_team_keys", arr(Shape::String)),
    ])
}

fn match_full() -> Shape {
    obj(vec![
        Field::required("key", Shape::String),
        Field::required("comp_level", Shape::String),
        Field::required("set_number", Shape::Number),
        Field::required("match_number", Shape::Number),
        Field::required(
            "alliances",
            obj(vec![
                Field::required("red", match_alliance()),
                Field::required("blue", match_alliance()),
            ]),
        ),
        Field::optional("winning_alliance", Shape::String),
        Field::required("event_key", Shape::String),
        Field::optional("time", Shape::Number),
        Field::optional("actual_time", Shape::Number),
        Field::optional("predicted_time", Shape::Number),
        Field::optional("post_result_time", Shape::Number),
        // Season-specific structure; deliberately left opaque.
        Field::optional("score_breakdown", map(Shape::Any)),
        Field::optional(
            "videos",
            arr(obj(vec![
                Field::required("type", Shape::String),
                Field::required("key", Shape::String),
            ])),
        ),
    ])
}

fn match_simple() -> Shape {
    let simple_alliance = obj(vec![
        Field::required("score", Shape::Number),
        Field::required("team_keys", arr(Shape::String)),
    ]);
    obj(vec![
        Field::required("key", Shape::String),
        Field::required("comp_level", Shape::String),
        Field::required("set_number", Shape::Number),
        Field::required("match_number", Shape::Number),
        Field::required(
            "alliances",
            obj(vec![
                Field::required("red", simple_alliance.clone()),
                Field::required("blue", simple_alliance),
            ]),
        ),
        Field::optional("winning_alliance", Shape::String),
        Field::required("event_key", Shape::String),
        Field::optional("time", Shape::Number),
        Field::optional("predicted_time", Shape::Number),
        Field::optional("actual_time", Shape::Number),
    ])
}

fn award() -> Shape {
    obj(vec![
        Field::required("name", Shape::String),
        Field::required("award_type", Shape::Number),
        Field::required("event_key", Shape::String),
        Field::required(
            "recipient_list",
            arr(obj(vec![
                Field::optional("team_key", Shape::String),
                Field::optional("awardee", Shape::String),
            ])),
        ),
        Field::required("year", Shape::Number),
    ])
}

fn ranking() -> Shape {
    obj(vec![
        Field::required(
            "rankings",
            arr(obj(vec![
                Field::required("team_key", Shape::String),
                Field::required("rank", Shape::Number),
                Field::optional("dq", Shape::Number),
                Field::required("matches_played", Shape::Number),
                Field::optional("qual_average", Shape::Number),
                Field::optional("record", wlt_record()),
                Field::optional("extra_stats", arr(Shape::Number)),
                Field::optional("sort_orders", arr(Shape::Number)),
            ])),
        ),
        Field::optional("extra_stats_info", sort_info()),
        Field::optional("sort_order_info", sort_info()),
    ])
}

fn alliance_status() -> Shape {
    obj(vec![
        Field::optional("current_level_record", wlt_record()),
        Field::optional("level", Shape::String),
        Field::optional("playoff_average", Shape::Number),
        Field::optional("record", wlt_record()),
        Field::optional("status", Shape::String),
    ])
}

fn alliance_backup() -> Shape {
    obj(vec![
        Field::optional("in", Shape::String),
        Field::optional("out", Shape::String),
    ])
}

fn alliance() -> Shape {
    obj(vec![
        Field::optional("name", Shape::String),
        Field::optional("backup", alliance_backup()),
        Field::optional("declines", arr(Shape::String)),
        Field::required("picks", arr(Shape::String)),
        Field::optional("status", alliance_status()),
    ])
}

fn district_points() -> Shape {
    obj(vec![
        Field::required(
            "points",
            map(obj(vec![
                Field::required("alliance_points", Shape::Number),
                Field::required("award_points", Shape::Number),
                Field::required("elim_points", Shape::Number),
                Field::required("qual_points", Shape::Number),
                Field::required("total", Shape::Number),
            ])),
        ),
        Field::optional(
            "tiebreakers",
            map(obj(vec![
                Field::optional("highest_qual_scores", arr(Shape::Number)),
                Field::optional("qual_wins", Shape::Number),
            ])),
        ),
    ])
}

fn insights() -> Shape {
    obj(vec![
        Field::optional("qual", map(Shape::Any)),
        Field::optional("playoff", map(Shape::Any)),
    ])
}

fn media() -> Shape {
    obj(vec![
        Field::required("type", Shape::String),
        Field::optional("foreign_key", Shape::String),
        Field::optional("details", map(Shape::Any)),
        Field::optional("preferred", Shape::Boolean),
        Field::optional("direct_url", Shape::String),
        Field::optional("view_url", Shape::String),
    ])
}

fn robot() -> Shape {
    obj(vec![
        Field::required("year", Shape::Number),
        Field::required("robot_name", Shape::String),
        Field::required("key", Shape::String),
        Field::required("team_key", Shape::String),
    ])
}

fn district() -> Shape {
    obj(vec![
        Field::required("abbreviation", Shape::String),
        Field::required("display_name", Shape::String),
        Field::required("key", Shape::String),
        Field::required("year", Shape::Number),
    ])
}

fn status() -> Shape {
    let app_versions = obj(vec![
        Field::required("latest_app_version", Shape::Number),
        Field::required("min_app_version", Shape::Number),
    ]);
    obj(vec![
        Field::required("current_season", Shape::Number),
        Field::required("max_season", Shape::Number),
        Field::required("is_datafeed_down", Shape::Boolean),
        Field::required("down_events", arr(Shape::String)),
        Field::required("ios", app_versions.clone()),
        Field::required("android", app_versions),
        Field::required("max_team_page", Shape::Number),
    ])
}

fn event_oprs() -> Shape {
    obj(vec![
        Field::required("oprs", map(Shape::Number)),
        Field::required("dprs", map(Shape::Number)),
        Field::required("ccwms", map(Shape::Number)),
    ])
}

fn team_event_status() -> Shape {
    obj(vec![
        Field::optional(
            "qual",
            obj(vec![
                Field::optional("num_teams", Shape::Number),
                Field::optional(
                    "ranking",
                    obj(vec![
                        Field::optional("dq", Shape::Number),
                        Field::required("matches_played", Shape::Number),
                        Field::optional("qual_average", Shape::Number),
                        Field::required("rank", Shape::Number),
                        Field::optional("record", wlt_record()),
                        Field::optional("sort_orders", arr(Shape::Number)),
                        Field::required("team_key", Shape::String),
                    ]),
                ),
                Field::optional("sort_order_info", sort_info()),
                Field::optional("status", Shape::String),
            ]),
        ),
        Field::optional(
            "alliance",
            obj(vec![
                Field::optional("backup", alliance_backup()),
                Field::optional("name", Shape::String),
                Field::optional("number", Shape::Number),
                Field::optional("pick", Shape::Number),
            ]),
        ),
        Field::optional("playoff", alliance_status()),
        Field::required("alliance_status_str", Shape::String),
        Field::required("playoff_status_str", Shape::String),
        Field::required("overall_status_str", Shape::String),
        Field::optional("next_match_key", Shape::String),
        Field::optional("last_match_key", Shape::String),
    ])
}

fn district_ranking() -> Shape {
    obj(vec![
        Field::required("team_key", Shape::String),
        Field::required("rank", Shape::Number),
        Field::optional("rookie_bonus", Shape::Number),
        Field::required("point_total", Shape::Number),
        Field::required(
            "event_points",
            arr(obj(vec![
                Field::required("district_cmp", Shape::Boolean),
                Field::required("total", Shape::Number),
                Field::required("alliance_points", Shape::Number),
                Field::required("elim_points", Shape::Number),
                Field::required("award_points", Shape::Number),
                Field::required("event_key", Shape::String),
                Field::required("qual_points", Shape::Number),
            ])),
        ),
    ])
}

fn zebra() -> Shape {
    let team_track = arr(obj(vec![
        Field::required("team_key", Shape::String),
        Field::optional("xs", arr(Shape::Number)),
        Field::optional("ys", arr(Shape::Number)),
    ]));
    obj(vec![
        Field::required("key", Shape::String),
        Field::required("times", arr(Shape::Number)),
        Field::required(
            "alliances",
            obj(vec![
                Field::required("red", team_track.clone()),
                Field::required("blue", team_track),
            ]),
        ),
    ])
}

fn prediction() -> Shape {
    // Prediction payloads vary by season and are sometimes arrays,
    // sometimes keyed objects; upstream offers no stable contract here.
    obj(vec![
        Field::optional("match_predictions", Shape::Any),
        Field::optional("ranking_predictions", Shape::Any),
        Field::optional("stat_mean_vars", map(Shape::Any)),
    ])
}

fn team_history() -> Shape {
    obj(vec![
        Field::optional("awards", arr(award())),
        Field::optional("events", arr(event())),
        Field::optional("matches", arr(match_full())),
        Field::optional("robots", arr(robot())),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::validate;
    use serde_json::json;

    #[test]
    fn test_every_entity_is_registered() {
        let all = [
            Entity::Team,
            Entity::TeamSimple,
            Entity::Event,
            Entity::EventSimple,
            Entity::Match,
            Entity::MatchSimple,
            Entity::Award,
            Entity::Ranking,
            Entity::Alliance,
            Entity::DistrictPoints,
            Entity::Insights,
            Entity::Media,
            Entity::Robot,
            Entity::District,
            Entity::Status,
            Entity::EventOprs,
            Entity::TeamEventStatus,
            Entity::DistrictRanking,
            Entity::Zebra,
            Entity::Prediction,
            Entity::TeamHistory,
        ];
        for entity in all {
            assert!(matches!(entity.shape(), Shape::Object(_)), "{entity:?}");
        }
    }

    #[test]
    fn test_team_shape_accepts_full_record() {
        let value = json!({
            "key": "frc86",
            "team_number": 86,
            "nickname": "Team Resistance",
            "name": "Team Resistance",
            "city": "Jacksonville",
            "state_prov": "Florida",
            "country": "USA",
            "rookie_year": 1996,
            "lat": null,
            "home_championship": {"2023": "Houston"}
        });
        assert!(validate(&value, Entity::Team.shape(), "$").is_ok());
    }

    #[test]
    fn test_team_shape_rejects_missing_name() {
        let value = json!({"key": "frc86", "team_number": 86});
        let err = validate(&value, Entity::Team.shape(), "$").unwrap_err();
        assert!(err.to_string().contains("$.name"));
    }

    #[test]
    fn test_match_shape_nested_alliances() {
        let value = json!({
            "key": "2023casj_qm1",
            "comp_level": "qm",
            "set_number": 1,
            "match_number": 1,
            "alliances": {
                "red": {"score": 100, "team_keys": ["frc86", "frc254", "frc1678"]},
                "blue": {"score": 98, "team_keys": ["frc971", "frc118", "frc148"]}
            },
            "winning_alliance": "red",
            "event_key": "2023casj",
            "score_breakdown": {"red": {"totalPoints": 100}, "blue": {"totalPoints": 98}}
        });
        assert!(validate(&value, Entity::Match.shape(), "$").is_ok());

        let bad = json!({
            "key": "2023casj_qm1",
            "comp_level": "qm",
            "set_number": 1,
            "match_number": 1,
            "alliances": {
                "red": {"score": "100", "team_keys": []},
                "blue": {"score": 98, "team_keys": []}
            },
            "event_key": "2023casj"
        });
        let err = validate(&bad, Entity::Match.shape(), "$").unwrap_err();
        assert!(err.to_string().contains("$.alliances.red.score"));
    }

    #[test]
    fn test_status_shape() {
        let value = json!({
            "current_season": 2026,
            "max_season": 2026,
            "is_datafeed_down": false,
            "down_events": [],
            "ios": {"latest_app_version": 3, "min_app_version": 1},
            "android": {"latest_app_version": 4, "min_app_version": 2},
            "max_team_page": 20
        });
        assert!(validate(&value, Entity::Status.shape(), "$").is_ok());
    }

    #[test]
    fn test_event_oprs_are_keyed_maps() {
        let value = json!({
            "oprs": {"frc86": 52.3, "frc254": 88.1},
            "dprs": {"frc86": 11.0, "frc254": 9.4},
            "ccwms": {"frc86": 41.3, "frc254": 78.7}
        });
        assert!(validate(&value, Entity::EventOprs.shape(), "$").is_ok());
    }

    #[test]
    fn test_prediction_payloads_are_opaque() {
        let keyed = json!({
            "match_predictions": {"qual": {"2023casj_qm1": {"red": {"score": 60.0}}}},
            "ranking_predictions": [["frc254", [1.0, 2.0]]],
            "stat_mean_vars": {"qual": {"opr": {"mean": {}}}}
        });
        assert!(validate(&keyed, Entity::Prediction.shape(), "$").is_ok());
    }

    #[test]
    fn test_team_history_composes_entity_shapes() {
        let value = json!({
            "awards": [{
                "name": "Regional Winner",
                "award_type": 1,
                "event_key": "2023fla",
                "recipient_list": [{"team_key": "frc86", "awardee": null}],
                "year": 2023
            }],
            "robots": [{
                "year": 2023,
                "robot_name": "Volt",
                "key": "frc86_2023",
                "team_key": "frc86"
            }]
        });
        assert!(validate(&value, Entity::TeamHistory.shape(), "$").is_ok());
    }
}
