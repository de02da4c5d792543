//! Operation catalogue.
//!
//! A single static table of operation records drives both sides of the
//! protocol: tool discovery renders each record's parameter list into a
//! JSON Schema, and dispatch validates arguments, derives the upstream
//! path, and selects the response shape from the same record. Because
//! both are views over one table, the advertised catalogue and the
//! dispatchable set cannot fall out of sync.

use serde_json::{json, Map, Value};

use crate::entities::Entity;
use crate::schema::{
    self, kind_of, max_year, validate_team_key, validate_year, ValidationError, MIN_YEAR,
};
use crate::types::ToolDefinition;

/// A named, typed tool parameter.
///
/// Every parameter is required; optional parameters do not occur in this
/// API — tools with fewer arguments are separate operations upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    /// Team key matching `^frc\d+$`.
    TeamKey,
    /// Opaque event key (conventionally `<year><shortcode>`).
    EventKey,
    /// Opaque match key (conventionally `<eventkey>_<level><number>`).
    MatchKey,
    /// Opaque district key (conventionally `<year><abbreviation>`).
    DistrictKey,
    /// Media tag filter.
    MediaTag,
    /// Competition year in `[1992, current year + 1]`.
    Year,
    /// Zero-indexed page number.
    PageNum,
}

impl Param {
    /// Argument name as it appears in tool schemas and argument maps.
    pub const fn name(self) -> &'static str {
        match self {
            Param::TeamKey => "team_key",
            Param::EventKey => "event_key",
            Param::MatchKey => "match_key",
            Param::DistrictKey => "district_key",
            Param::MediaTag => "media_tag",
            Param::Year => "year",
            Param::PageNum => "page_num",
        }
    }

    /// JSON Schema property for discovery, including inline constraints
    /// so clients can validate before invoking.
    fn json_schema(self) -> Value {
        match self {
            Param::TeamKey => json!({
                "type": "string",
                "description": "Team key in format frcXXXX (e.g., frc86)",
                "pattern": "^frc\\d+$",
            }),
            Param::EventKey => json!({
                "type": "string",
                "description": "Event key (e.g., 2023casj)",
            }),
            Param::MatchKey => json!({
                "type": "string",
                "description": "Match key (e.g., 2023casj_qm1)",
            }),
            Param::DistrictKey => json!({
                "type": "string",
                "description": "District key (e.g., 2023fim)",
            }),
            Param::MediaTag => json!({
                "type": "string",
                "description": "Media tag to filter by",
            }),
            Param::Year => json!({
                "type": "number",
                "description": "Competition year",
                "minimum": MIN_YEAR,
                "maximum": max_year(),
            }),
            Param::PageNum => json!({
                "type": "number",
                "description": "Page number (0-indexed)",
                "minimum": 0,
            }),
        }
    }

    /// Validate one argument value and render it as a path segment.
    ///
    /// Nothing reaches a path template without passing this first, which
    /// keeps malformed segments out of derived URLs.
    fn validate(self, value: &Value, path: &str) -> Result<String, ValidationError> {
        match self {
            Param::TeamKey => {
                let s = expect_string(value, path)?;
                validate_team_key(s, path)?;
                Ok(s.to_string())
            }
            Param::EventKey | Param::MatchKey | Param::DistrictKey | Param::MediaTag => {
                Ok(expect_string(value, path)?.to_string())
            }
            Param::Year => {
                let year = expect_integer(value, path)?;
                validate_year(year, path)?;
                Ok(year.to_string())
            }
            Param::PageNum => {
                let page = expect_integer(value, path)?;
                if page < 0 {
                    return Err(ValidationError::Constraint {
                        path: path.to_string(),
                        message: format!("page number {} must be >= 0", page),
                    });
                }
                Ok(page.to_string())
            }
        }
    }
}

fn expect_string<'a>(value: &'a Value, path: &str) -> Result<&'a str, ValidationError> {
    value.as_str().ok_or_else(|| ValidationError::WrongKind {
        path: path.to_string(),
        expected: "string",
        actual: kind_of(value),
    })
}

fn expect_integer(value: &Value, path: &str) -> Result<i64, ValidationError> {
    value.as_i64().ok_or_else(|| ValidationError::WrongKind {
        path: path.to_string(),
        expected: "integer",
        actual: kind_of(value),
    })
}

/// Declared shape of an operation's upstream response.
#[derive(Debug, Clone, Copy)]
pub enum Output {
    /// A single entity object.
    One(Entity),
    /// An array of entities.
    Many(Entity),
    /// A string-keyed map of entities.
    Keyed(Entity),
    /// An array of opaque key strings.
    Strings,
    /// An array of numbers (years participated).
    Numbers,
}

impl Output {
    /// Validate a response body against this output shape.
    pub fn validate(self, value: &Value) -> Result<(), ValidationError> {
        match self {
            Output::One(entity) => schema::validate(value, entity.shape(), "$"),
            Output::Many(entity) => each_element(value, |item, path| {
                schema::validate(item, entity.shape(), path)
            }),
            Output::Keyed(entity) => {
                let Value::Object(map) = value else {
                    return Err(ValidationError::WrongKind {
                        path: "$".to_string(),
                        expected: "object",
                        actual: kind_of(value),
                    });
                };
                for (key, item) in map {
                    schema::validate(item, entity.shape(), &format!("$.{}", key))?;
                }
                Ok(())
            }
            Output::Strings => each_element(value, |item, path| {
                schema::validate(item, &schema::Shape::String, path)
            }),
            Output::Numbers => each_element(value, |item, path| {
                schema::validate(item, &schema::Shape::Number, path)
            }),
        }
    }
}

fn each_element(
    value: &Value,
    check: impl Fn(&Value, &str) -> Result<(), ValidationError>,
) -> Result<(), ValidationError> {
    let Value::Array(items) = value else {
        return Err(ValidationError::WrongKind {
            path: "$".to_string(),
            expected: "array",
            actual: kind_of(value),
        });
    };
    for (i, item) in items.iter().enumerate() {
        check(item, &format!("$[{}]", i))?;
    }
    Ok(())
}

/// One read-only operation against the upstream API.
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    /// Unique tool name.
    pub name: &'static str,

    /// Human-readable description for discovery.
    pub description: &'static str,

    /// Required parameters, in schema order.
    pub params: &'static [Param],

    /// Upstream path template with `{param_name}` placeholders.
    pub path: &'static str,

    /// Declared response shape.
    pub output: Output,
}

impl Operation {
    /// Render the parameter list as a JSON Schema object.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for param in self.params {
            properties.insert(param.name().to_string(), param.json_schema());
            required.push(param.name());
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Tool descriptor for discovery.
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name, self.description).with_schema(self.input_schema())
    }

    /// Validate raw arguments, returning path segments keyed by parameter
    /// name. Fails on the first missing, mistyped, or constraint-violating
    /// argument; extra arguments are ignored.
    pub fn validate_args(
        &self,
        args: &Map<String, Value>,
    ) -> Result<Vec<(&'static str, String)>, ValidationError> {
        let mut segments = Vec::with_capacity(self.params.len());
        for param in self.params {
            let name = param.name();
            let value = args.get(name).ok_or_else(|| ValidationError::MissingField {
                path: format!("$.{}", name),
            })?;
            let segment = param.validate(value, &format!("$.{}", name))?;
            segments.push((name, segment));
        }
        Ok(segments)
    }

    /// Substitute validated segments into the path template.
    pub fn resolve_path(&self, segments: &[(&'static str, String)]) -> String {
        let mut path = self.path.to_string();
        for (name, segment) in segments {
            path = path.replace(&format!("{{{}}}", name), segment);
        }
        path
    }
}

/// Look up an operation by tool name.
pub fn find(name: &str) -> Option<&'static Operation> {
    OPERATIONS.iter().find(|op| op.name == name)
}

use Entity::*;
use Output::{Keyed, Many, Numbers, One, Strings};
use Param::{DistrictKey, EventKey, MatchKey, MediaTag, PageNum, TeamKey, Year};

/// The complete operation table, in discovery order.
pub static OPERATIONS: &[Operation] = &[
    Operation {
        name: "get_team",
        description: "Get detailed information about a specific FRC team",
        params: &[TeamKey],
        path: "/team/{team_key}",
        output: One(Team),
    },
    Operation {
        name: "get_team_events",
        description: "Get events that a team has participated in for a given year",
        params: &[TeamKey, Year],
        path: "/team/{team_key}/events/{year}",
        output: Many(Event),
    },
    Operation {
        name: "get_team_awards",
        description: "Get awards won by a team in a specific year",
        params: &[TeamKey, Year],
        path: "/team/{team_key}/awards/{year}",
        output: Many(Award),
    },
    Operation {
        name: "get_team_matches",
        description: "Get matches played by a team in a specific year",
        params: &[TeamKey, Year],
        path: "/team/{team_key}/matches/{year}",
        output: Many(Match),
    },
    Operation {
        name: "get_events",
        description: "Get all FRC events for a specific year",
        params: &[Year],
        path: "/events/{year}",
        output: Many(Event),
    },
    Operation {
        name: "get_event",
        description: "Get detailed information about a specific event",
        params: &[EventKey],
        path: "/event/{event_key}",
        output: One(Event),
    },
    Operation {
        name: "get_event_teams",
        description: "Get teams participating in a specific event",
        params: &[EventKey],
        path: "/event/{event_key}/teams",
        output: Many(Team),
    },
    Operation {
        name: "get_event_rankings",
        description: "Get team rankings for a specific event",
        params: &[EventKey],
        path: "/event/{event_key}/rankings",
        output: One(Ranking),
    },
    Operation {
        name: "get_event_matches",
        description: "Get matches for a specific event",
        params: &[EventKey],
        path: "/event/{event_key}/matches",
        output: Many(Match),
    },
    Operation {
        name: "get_event_alliances",
        description: "Get elimination alliances for a specific event",
        params: &[EventKey],
        path: "/event/{event_key}/alliances",
        output: Many(Alliance),
    },
    Operation {
        name: "get_event_insights",
        description: "Get event-specific insights and statistics",
        params: &[EventKey],
        path: "/event/{event_key}/insights",
        output: One(Insights),
    },
    Operation {
        name: "get_event_district_points",
        description: "Get district points for teams at an event",
        params: &[EventKey],
        path: "/event/{event_key}/district_points",
        output: One(DistrictPoints),
    },
    Operation {
        name: "get_team_years_participated",
        description: "Get years that a team has participated in competition",
        params: &[TeamKey],
        path: "/team/{team_key}/years_participated",
        output: Numbers,
    },
    Operation {
        name: "get_team_districts",
        description: "Get district history for a team",
        params: &[TeamKey],
        path: "/team/{team_key}/districts",
        output: Many(District),
    },
    Operation {
        name: "get_team_robots",
        description: "Get robot names for a team by year",
        params: &[TeamKey],
        path: "/team/{team_key}/robots",
        output: Many(Robot),
    },
    Operation {
        name: "get_team_media",
        description: "Get media for a team in a specific year",
        params: &[TeamKey, Year],
        path: "/team/{team_key}/media/{year}",
        output: Many(Media),
    },
    Operation {
        name: "get_team_event_matches",
        description: "Get matches for a team at a specific event",
        params: &[TeamKey, EventKey],
        path: "/team/{team_key}/event/{event_key}/matches",
        output: Many(Match),
    },
    Operation {
        name: "get_teams",
        description: "Get list of teams with pagination",
        params: &[PageNum],
        path: "/teams/{page_num}",
        output: Many(Team),
    },
    Operation {
        name: "get_status",
        description: "Get TBA API status information",
        params: &[],
        path: "/status",
        output: One(Status),
    },
    Operation {
        name: "get_match",
        description: "Get detailed information about a specific match",
        params: &[MatchKey],
        path: "/match/{match_key}",
        output: One(Match),
    },
    Operation {
        name: "get_event_oprs",
        description: "Get OPR, DPR, and CCWM ratings for teams at an event",
        params: &[EventKey],
        path: "/event/{event_key}/oprs",
        output: One(EventOprs),
    },
    Operation {
        name: "get_event_awards",
        description: "Get awards from a specific event",
        params: &[EventKey],
        path: "/event/{event_key}/awards",
        output: Many(Award),
    },
    Operation {
        name: "get_team_awards_all",
        description: "Get all awards won by a team across all years",
        params: &[TeamKey],
        path: "/team/{team_key}/awards",
        output: Many(Award),
    },
    Operation {
        name: "get_team_events_all",
        description: "Get all events a team has participated in across all years",
        params: &[TeamKey],
        path: "/team/{team_key}/events",
        output: Many(Event),
    },
    Operation {
        name: "get_team_event_status",
        description: "Get team competition rank and status at a specific event",
        params: &[TeamKey, EventKey],
        path: "/team/{team_key}/event/{event_key}/status",
        output: One(TeamEventStatus),
    },
    Operation {
        name: "get_districts",
        description: "Get all districts for a specific year",
        params: &[Year],
        path: "/districts/{year}",
        output: Many(District),
    },
    Operation {
        name: "get_district_rankings",
        description: "Get team rankings within a district",
        params: &[DistrictKey],
        path: "/district/{district_key}/rankings",
        output: Many(DistrictRanking),
    },
    Operation {
        name: "get_teams_simple",
        description: "Get simplified list of teams with pagination",
        params: &[PageNum],
        path: "/teams/{page_num}/simple",
        output: Many(TeamSimple),
    },
    Operation {
        name: "get_teams_keys",
        description: "Get list of team keys with pagination",
        params: &[PageNum],
        path: "/teams/{page_num}/keys",
        output: Strings,
    },
    Operation {
        name: "get_teams_by_year",
        description: "Get teams that competed in a specific year",
        params: &[Year, PageNum],
        path: "/teams/{year}/{page_num}",
        output: Many(Team),
    },
    Operation {
        name: "get_teams_by_year_simple",
        description: "Get simplified teams that competed in a specific year",
        params: &[Year, PageNum],
        path: "/teams/{year}/{page_num}/simple",
        output: Many(TeamSimple),
    },
    Operation {
        name: "get_teams_by_year_keys",
        description: "Get team keys that competed in a specific year",
        params: &[Year, PageNum],
        path: "/teams/{year}/{page_num}/keys",
        output: Strings,
    },
    Operation {
        name: "get_team_simple",
        description: "Get simplified information about a specific team",
        params: &[TeamKey],
        path: "/team/{team_key}/simple",
        output: One(TeamSimple),
    },
    Operation {
        name: "get_event_simple",
        description: "Get simplified information about a specific event",
        params: &[EventKey],
        path: "/event/{event_key}/simple",
        output: One(EventSimple),
    },
    Operation {
        name: "get_events_simple",
        description: "Get simplified list of events for a year",
        params: &[Year],
        path: "/events/{year}/simple",
        output: Many(EventSimple),
    },
    Operation {
        name: "get_events_keys",
        description: "Get list of event keys for a year",
        params: &[Year],
        path: "/events/{year}/keys",
        output: Strings,
    },
    Operation {
        name: "get_match_simple",
        description: "Get simplified information about a specific match",
        params: &[MatchKey],
        path: "/match/{match_key}/simple",
        output: One(MatchSimple),
    },
    Operation {
        name: "get_team_events_simple",
        description: "Get simplified events for a team in a specific year",
        params: &[TeamKey, Year],
        path: "/team/{team_key}/events/{year}/simple",
        output: Many(EventSimple),
    },
    Operation {
        name: "get_team_events_keys",
        description: "Get event keys for a team in a specific year",
        params: &[TeamKey, Year],
        path: "/team/{team_key}/events/{year}/keys",
        output: Strings,
    },
    Operation {
        name: "get_team_event_awards",
        description: "Get awards won by a team at a specific event",
        params: &[TeamKey, EventKey],
        path: "/team/{team_key}/event/{event_key}/awards",
        output: Many(Award),
    },
    Operation {
        name: "get_team_matches_simple",
        description: "Get simplified matches for a team in a specific year",
        params: &[TeamKey, Year],
        path: "/team/{team_key}/matches/{year}/simple",
        output: Many(MatchSimple),
    },
    Operation {
        name: "get_team_matches_keys",
        description: "Get match keys for a team in a specific year",
        params: &[TeamKey, Year],
        path: "/team/{team_key}/matches/{year}/keys",
        output: Strings,
    },
    Operation {
        name: "get_team_social_media",
        description: "Get social media information for a team",
        params: &[TeamKey],
        path: "/team/{team_key}/social_media",
        output: Many(Media),
    },
    Operation {
        name: "get_team_media_by_tag",
        description: "Get media for a team filtered by tag",
        params: &[TeamKey, MediaTag],
        path: "/team/{team_key}/media/tag/{media_tag}",
        output: Many(Media),
    },
    Operation {
        name: "get_team_media_by_tag_year",
        description: "Get media for a team filtered by tag and year",
        params: &[TeamKey, MediaTag, Year],
        path: "/team/{team_key}/media/tag/{media_tag}/{year}",
        output: Many(Media),
    },
    Operation {
        name: "get_event_teams_simple",
        description: "Get simplified teams participating in an event",
        params: &[EventKey],
        path: "/event/{event_key}/teams/simple",
        output: Many(TeamSimple),
    },
    Operation {
        name: "get_event_teams_keys",
        description: "Get team keys participating in an event",
        params: &[EventKey],
        path: "/event/{event_key}/teams/keys",
        output: Strings,
    },
    Operation {
        name: "get_event_matches_simple",
        description: "Get simplified matches for an event",
        params: &[EventKey],
        path: "/event/{event_key}/matches/simple",
        output: Many(MatchSimple),
    },
    Operation {
        name: "get_event_matches_keys",
        description: "Get match keys for an event",
        params: &[EventKey],
        path: "/event/{event_key}/matches/keys",
        output: Strings,
    },
    Operation {
        name: "get_event_predictions",
        description: "Get TBA-generated predictions for an event",
        params: &[EventKey],
        path: "/event/{event_key}/predictions",
        output: One(Prediction),
    },
    Operation {
        name: "get_match_zebra",
        description: "Get Zebra MotionWorks data for a match",
        params: &[MatchKey],
        path: "/match/{match_key}/zebra",
        output: One(Zebra),
    },
    Operation {
        name: "get_team_history",
        description: "Get historical data for a team across all years",
        params: &[TeamKey],
        path: "/team/{team_key}/history",
        output: One(TeamHistory),
    },
    Operation {
        name: "get_team_event_statuses",
        description: "Get team event statuses for all events in a year",
        params: &[TeamKey, Year],
        path: "/team/{team_key}/events/{year}/statuses",
        output: Keyed(TeamEventStatus),
    },
    Operation {
        name: "get_team_event_matches_simple",
        description: "Get simplified matches for a team at a specific event",
        params: &[TeamKey, EventKey],
        path: "/team/{team_key}/event/{event_key}/matches/simple",
        output: Many(MatchSimple),
    },
    Operation {
        name: "get_team_event_matches_keys",
        description: "Get match keys for a team at a specific event",
        params: &[TeamKey, EventKey],
        path: "/team/{team_key}/event/{event_key}/matches/keys",
        output: Strings,
    },
    Operation {
        name: "get_district_events",
        description: "Get events in a specific district",
        params: &[DistrictKey],
        path: "/district/{district_key}/events",
        output: Many(Event),
    },
    Operation {
        name: "get_district_events_simple",
        description: "Get simplified events in a specific district",
        params: &[DistrictKey],
        path: "/district/{district_key}/events/simple",
        output: Many(EventSimple),
    },
    Operation {
        name: "get_district_events_keys",
        description: "Get event keys in a specific district",
        params: &[DistrictKey],
        path: "/district/{district_key}/events/keys",
        output: Strings,
    },
    Operation {
        name: "get_district_teams",
        description: "Get teams in a specific district",
        params: &[DistrictKey],
        path: "/district/{district_key}/teams",
        output: Many(Team),
    },
    Operation {
        name: "get_district_teams_simple",
        description: "Get simplified teams in a specific district",
        params: &[DistrictKey],
        path: "/district/{district_key}/teams/simple",
        output: Many(TeamSimple),
    },
    Operation {
        name: "get_district_teams_keys",
        description: "Get team keys in a specific district",
        params: &[DistrictKey],
        path: "/district/{district_key}/teams/keys",
        output: Strings,
    },
];
