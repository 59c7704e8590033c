//! ICS document generation.

use icalendar::{Calendar, Component, Property, ValueType};

use super::CalendarMeta;
use crate::event::{EventTime, PhenomenonEvent, CST_TZID};

/// Fixed VTIMEZONE definition for China Standard Time. CST has observed no
/// DST since 1991, so a single STANDARD block anchored at the epoch covers
/// every event the feed can produce.
const CST_VTIMEZONE: &str = "BEGIN:VTIMEZONE\r\n\
    TZID:Asia/Shanghai\r\n\
    BEGIN:STANDARD\r\n\
    DTSTART:19700101T000000\r\n\
    TZOFFSETFROM:+0800\r\n\
    TZOFFSETTO:+0800\r\n\
    END:STANDARD\r\n\
    END:VTIMEZONE\r\n";

/// Render the full calendar document for the given events, in order.
pub fn render_calendar(meta: &CalendarMeta, events: &[PhenomenonEvent]) -> String {
    let mut cal = Calendar::new();
    cal.append_property(Property::new("METHOD", "PUBLISH"));
    cal.append_property(Property::new("CLASS", "PUBLIC"));
    cal.append_property(Property::new("X-WR-CALNAME", &meta.name));
    cal.append_property(Property::new("X-WR-CALDESC", &meta.description));

    for event in events {
        cal.push(build_vevent(event));
    }

    let cal = cal.done();
    finalize(&cal.to_string())
}

fn build_vevent(event: &PhenomenonEvent) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid());
    ics_event.summary(&event.name);

    add_time_property(&mut ics_event, "DTSTART", &event.start);
    add_time_property(&mut ics_event, "DTEND", &event.end);

    // DTSTAMP is required by RFC 5545; without an explicit one the icalendar
    // crate injects the wall clock and consecutive runs differ byte-for-byte.
    add_time_property(&mut ics_event, "DTSTAMP", &event.start);

    if let Some(ref desc) = event.description {
        ics_event.description(desc);
    }

    ics_event.done()
}

/// Add a date or date-time property matching the event's granularity.
fn add_time_property(ics_event: &mut icalendar::Event, name: &str, time: &EventTime) {
    match time {
        EventTime::Date(d) => {
            let mut prop = Property::new(name, d.format("%Y%m%d").to_string());
            prop.append_parameter(ValueType::Date);
            ics_event.append_property(prop);
        }
        EventTime::DateTime(dt) => {
            let mut prop = Property::new(name, dt.format("%Y%m%dT%H%M%S").to_string());
            prop.add_parameter("TZID", CST_TZID);
            ics_event.append_property(prop);
        }
    }
}

/// Clean up the icalendar crate's output and splice in the timezone block:
/// - Pin PRODID (the crate advertises its own version there)
/// - Remove CALSCALE:GREGORIAN (it's the default)
/// - Insert the VTIMEZONE definition ahead of the first VEVENT
fn finalize(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len() + CST_VTIMEZONE.len());
    let mut timezone_written = false;

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:ASTROCAL\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        if !timezone_written && (line == "BEGIN:VEVENT" || line == "END:VCALENDAR") {
            result.push_str(CST_VTIMEZONE);
            timezone_written = true;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use icalendar::parser::{read_calendar, unfold};
    use icalendar::{CalendarDateTime, DatePerhapsTime};

    fn meta() -> CalendarMeta {
        CalendarMeta {
            name: "天象日历".to_string(),
            description: "自动抓取上海天文馆数据".to_string(),
        }
    }

    fn all_day(name: &str, y: i32, m: u32, d: u32) -> PhenomenonEvent {
        PhenomenonEvent::new(
            name,
            EventTime::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap()),
            None,
        )
    }

    fn timed(
        name: &str,
        y: i32,
        m: u32,
        d: u32,
        h: u32,
        mi: u32,
        desc: Option<&str>,
    ) -> PhenomenonEvent {
        PhenomenonEvent::new(
            name,
            EventTime::DateTime(
                NaiveDate::from_ymd_opt(y, m, d)
                    .unwrap()
                    .and_hms_opt(h, mi, 0)
                    .unwrap(),
            ),
            desc.map(str::to_string),
        )
    }

    #[test]
    fn test_calendar_shell_has_fixed_metadata() {
        let ics = render_calendar(&meta(), &[]);
        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert!(ics.contains("VERSION:2.0"));
        assert!(ics.contains("METHOD:PUBLISH"));
        assert!(ics.contains("CLASS:PUBLIC"));
        assert!(ics.contains("X-WR-CALNAME:天象日历"));
        assert!(ics.contains("X-WR-CALDESC:自动抓取上海天文馆数据"));
        assert!(ics.contains("PRODID:ASTROCAL"));
        assert!(!ics.contains("CALSCALE"), "CALSCALE should be stripped");
    }

    #[test]
    fn test_timezone_block_is_present_even_without_events() {
        let ics = render_calendar(&meta(), &[]);
        assert!(ics.contains("BEGIN:VTIMEZONE\r\nTZID:Asia/Shanghai\r\n"));
        assert!(ics.contains("DTSTART:19700101T000000"));
        assert!(ics.contains("TZOFFSETFROM:+0800"));
        assert!(ics.contains("TZOFFSETTO:+0800"));
    }

    #[test]
    fn test_timezone_block_precedes_first_event() {
        let ics = render_calendar(&meta(), &[all_day("夏至", 2021, 6, 21)]);
        let tz = ics.find("BEGIN:VTIMEZONE").expect("Should have VTIMEZONE");
        let ev = ics.find("BEGIN:VEVENT").expect("Should have VEVENT");
        assert!(tz < ev, "VTIMEZONE must come before the first VEVENT");
        assert_eq!(
            ics.matches("BEGIN:VTIMEZONE").count(),
            1,
            "Exactly one timezone definition"
        );
    }

    #[test]
    fn test_all_day_event_uses_date_values() {
        let ics = render_calendar(&meta(), &[all_day("象限仪座流星雨", 2022, 1, 4)]);
        assert!(
            ics.contains("DTSTART;VALUE=DATE:20220104"),
            "DTSTART should have VALUE=DATE parameter. ICS:\n{}",
            ics
        );
        assert!(ics.contains("DTEND;VALUE=DATE:20220104"));
        assert!(ics.contains("DTSTAMP;VALUE=DATE:20220104"));
        assert!(!ics.contains("TZID="), "All-day events carry no TZID");
    }

    #[test]
    fn test_timed_event_uses_zoned_datetime_values() {
        let ics = render_calendar(&meta(), &[timed("月掩金星", 2021, 6, 13, 9, 5, None)]);
        assert!(
            ics.contains("DTSTART;TZID=Asia/Shanghai:20210613T090500"),
            "DTSTART should carry the CST TZID. ICS:\n{}",
            ics
        );
        assert!(ics.contains("DTEND;TZID=Asia/Shanghai:20210613T090500"));
        assert!(ics.contains("DTSTAMP;TZID=Asia/Shanghai:20210613T090500"));
    }

    #[test]
    fn test_uid_and_description_are_emitted() {
        let ics = render_calendar(
            &meta(),
            &[timed("月掩金星", 2021, 6, 13, 9, 5, Some("白天发生"))],
        );
        assert!(ics.contains("UID:2021-06-13T09:05:00/月掩金星/astrocal"));
        assert!(ics.contains("SUMMARY:月掩金星"));
        assert!(ics.contains("DESCRIPTION:白天发生"));
    }

    #[test]
    fn test_event_without_description_omits_the_property() {
        let ics = render_calendar(&meta(), &[all_day("夏至", 2021, 6, 21)]);
        assert!(!ics.contains("DESCRIPTION:"));
    }

    #[test]
    fn test_events_keep_insertion_order() {
        let ics = render_calendar(
            &meta(),
            &[all_day("夏至", 2021, 6, 21), all_day("小暑", 2021, 7, 7)],
        );
        let first = ics.find("SUMMARY:夏至").expect("Should have first event");
        let second = ics.find("SUMMARY:小暑").expect("Should have second event");
        assert!(first < second, "Events must stay in insertion order");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let events = vec![
            timed("月掩金星", 2021, 6, 13, 9, 5, Some("白天发生，难以观测")),
            all_day("夏至", 2021, 6, 21),
        ];
        assert_eq!(
            render_calendar(&meta(), &events),
            render_calendar(&meta(), &events),
            "Identical input must render byte-identical output"
        );
    }

    #[test]
    fn test_round_trip_through_standard_parser() {
        let events = vec![
            timed("月掩金星", 2021, 6, 13, 9, 5, Some("白天发生，难以观测")),
            all_day("夏至", 2021, 6, 21),
        ];
        let ics = render_calendar(&meta(), &events);

        let unfolded = unfold(&ics);
        let calendar = read_calendar(&unfolded).expect("Should parse rendered ICS");
        let vevents: Vec<_> = calendar
            .components
            .iter()
            .filter(|c| c.name == "VEVENT")
            .collect();
        assert_eq!(vevents.len(), 2);

        let first = vevents[0];
        assert_eq!(
            first
                .find_prop("SUMMARY")
                .expect("Should have SUMMARY")
                .val
                .as_ref(),
            "月掩金星"
        );
        assert_eq!(
            first
                .find_prop("DESCRIPTION")
                .expect("Should have DESCRIPTION")
                .val
                .as_ref(),
            "白天发生，难以观测"
        );
        let start =
            DatePerhapsTime::try_from(first.find_prop("DTSTART").expect("Should have DTSTART"))
                .unwrap_or_else(|_| panic!("Should convert DTSTART"));
        match start {
            DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
                assert_eq!(tzid, "Asia/Shanghai");
                assert_eq!(
                    date_time,
                    NaiveDate::from_ymd_opt(2021, 6, 13)
                        .unwrap()
                        .and_hms_opt(9, 5, 0)
                        .unwrap()
                );
            }
            other => panic!("Expected zoned datetime, got {:?}", other),
        }

        let second = vevents[1];
        assert!(second.find_prop("DESCRIPTION").is_none());
        for prop_name in ["DTSTART", "DTEND"] {
            let value = DatePerhapsTime::try_from(
                second.find_prop(prop_name).expect("Should have date prop"),
            )
            .unwrap_or_else(|_| panic!("Should convert {}", prop_name));
            match value {
                DatePerhapsTime::Date(d) => {
                    assert_eq!(d, NaiveDate::from_ymd_opt(2021, 6, 21).unwrap())
                }
                other => panic!("Expected bare date for {}, got {:?}", prop_name, other),
            }
        }
    }
}
