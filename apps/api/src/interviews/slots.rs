use chrono::{Duration, NaiveTime};

const FIRST_SLOT: (u32, u32) = (10, 0);
const LAST_SLOT: (u32, u32) = (16, 0);
const SLOT_MINUTES: i64 = 30;

/// Bookable interview start times, `10:00 AM` through `04:00 PM` inclusive.
pub fn interview_time_slots() -> Vec<String> {
    let (Some(mut current), Some(end)) = (
        NaiveTime::from_hms_opt(FIRST_SLOT.0, FIRST_SLOT.1, 0),
        NaiveTime::from_hms_opt(LAST_SLOT.0, LAST_SLOT.1, 0),
    ) else {
        return Vec::new();
    };

    let mut slots = Vec::new();
    while current <= end {
        slots.push(current.format("%I:%M %p").to_string());
        current += Duration::minutes(SLOT_MINUTES);
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirteen_half_hour_slots() {
        let slots = interview_time_slots();
        assert_eq!(slots.len(), 13);
        assert_eq!(slots.first().map(String::as_str), Some("10:00 AM"));
        assert_eq!(slots[1], "10:30 AM");
        assert_eq!(slots[4], "12:00 PM");
        assert_eq!(slots.last().map(String::as_str), Some("04:00 PM"));
    }
}
