pub mod schema;
pub mod solve;
pub mod validate;

use std::io::{Read, Write};
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use types::SolveEnvelope;

/// Reads a request document from `input`, or from stdin when it is `-`.
pub fn read_envelope(input: &Path) -> anyhow::Result<SolveEnvelope> {
    let text = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading request from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("reading {}", input.display()))?
    };
    parse_envelope(&text)
}

pub fn parse_envelope(text: &str) -> anyhow::Result<SolveEnvelope> {
    serde_json::from_str(text).context("parsing request JSON")
}

pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{ClassType, Day, RoomType, TimeOfDay};

    const REQUEST: &str = r#"{
        "constraints": {
            "maxClassesPerDay": 5,
            "startTime": "08:30",
            "endTime": "16:30",
            "lunchBreak": { "startTime": "12:30", "duration": 45 },
            "classDuration": 90
        },
        "subjects": [{
            "id": "CS101",
            "code": "CS101",
            "name": "Intro to Programming",
            "type": "practical",
            "classRequirements": {
                "classesPerWeek": 2,
                "preferredClassroomType": "laboratory",
                "minClassroomCapacity": 25
            },
            "fixedTimeSlots": [{
                "day": "friday",
                "startTime": "10:00",
                "endTime": "11:30",
                "classroom": "LAB-1"
            }]
        }],
        "faculty": [{
            "id": "F-ADA",
            "name": "Ada",
            "subjects": ["CS101"],
            "availability": {
                "saturday": { "isAvailable": false },
                "monday": { "blocked": [{ "startTime": "08:30", "endTime": "10:00", "reason": "board" }] }
            }
        }],
        "classrooms": [{ "id": "LAB-1", "type": "laboratory", "capacity": 32 }],
        "params": { "populationSize": 12, "seed": 42 }
    }"#;

    #[test]
    fn parses_a_camel_case_request_with_params() {
        let env = parse_envelope(REQUEST).unwrap();
        let req = &env.request;
        assert_eq!(req.constraints.start_time, TimeOfDay::from_hm(8, 30));
        assert_eq!(req.constraints.lunch_break.duration, 45);
        let s = &req.subjects[0];
        assert_eq!(s.class_type, ClassType::Practical);
        assert_eq!(s.class_requirements.hours_per_class, 1);
        assert_eq!(s.class_requirements.preferred_classroom_type, RoomType::Laboratory);
        assert_eq!(s.fixed_time_slots[0].day, Day::Friday);

        let f = &req.faculty[0];
        assert_eq!(f.workload.max_hours_per_week, 20);
        assert!(!f.availability.get(Day::Saturday).unwrap().is_available);
        assert!(f.availability.get(Day::Monday).unwrap().is_available);

        assert_eq!(env.params.population_size, 12);
        assert_eq!(env.params.seed, 42);
        assert_eq!(env.params.generations, 100);
    }

    #[test]
    fn params_are_optional() {
        let env = parse_envelope(r#"{ "subjects": [] }"#).unwrap();
        assert_eq!(env.params, types::GaParams::default());
        assert!(env.request.subjects.is_empty());
    }

    #[test]
    fn malformed_time_is_reported() {
        let err = parse_envelope(r#"{ "constraints": { "startTime": "9h" } }"#).unwrap_err();
        assert!(format!("{err:#}").contains("parsing request JSON"));
    }
}
