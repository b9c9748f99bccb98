use lakwatsero_shared::models::{ManifestPassenger, TripType};
use lakwatsero_shared::Masked;

use crate::assignment::Leg;

/// One passenger row of the booking form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Passenger {
    pub full_name: String,
    pub birthdate: String,
    pub passport_number: Masked<String>,
    pub nationality: String,
    pub outbound_seat_number: Option<String>,
    pub return_seat_number: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassengerField {
    FullName,
    Birthdate,
    PassportNumber,
    Nationality,
}

impl Passenger {
    pub fn seat(&self, leg: Leg) -> Option<&str> {
        match leg {
            Leg::Outbound => self.outbound_seat_number.as_deref(),
            Leg::Return => self.return_seat_number.as_deref(),
        }
    }

    pub(crate) fn seat_slot_mut(&mut self, leg: Leg) -> &mut Option<String> {
        match leg {
            Leg::Outbound => &mut self.outbound_seat_number,
            Leg::Return => &mut self.return_seat_number,
        }
    }

    pub fn set_field(&mut self, field: PassengerField, value: impl Into<String>) {
        let value = value.into();
        match field {
            PassengerField::FullName => self.full_name = value,
            PassengerField::Birthdate => self.birthdate = value,
            PassengerField::PassportNumber => self.passport_number = Masked(value),
            PassengerField::Nationality => self.nationality = value,
        }
    }

    /// Heading shown above the passenger's form section.
    pub fn display_name(&self, index: usize) -> String {
        if self.full_name.is_empty() {
            format!("Passenger {}", index + 1)
        } else {
            self.full_name.clone()
        }
    }

    pub fn to_manifest(&self, trip_type: TripType) -> ManifestPassenger {
        ManifestPassenger {
            full_name: self.full_name.clone(),
            birthdate: self.birthdate.clone(),
            passport_number: self.passport_number.clone(),
            nationality: self.nationality.clone(),
            outbound_seat_number: self.outbound_seat_number.clone().unwrap_or_default(),
            return_seat_number: match trip_type {
                TripType::Roundtrip => Some(self.return_seat_number.clone().unwrap_or_default()),
                TripType::Oneway => None,
            },
        }
    }
}

/// Resizes the passenger list to `max(1, new_count)` entries.
///
/// Entries that survive keep every field, seats included. Trailing entries
/// are dropped together with their seat assignments, without any warning.
pub fn resize(current: &[Passenger], new_count: usize) -> Vec<Passenger> {
    let count = new_count.max(1);
    (0..count)
        .map(|i| current.get(i).cloned().unwrap_or_default())
        .collect()
}

/// Parses the raw passenger-count input and clamps it to `1..=max`.
/// Anything that is not a positive integer prefix (empty, negative, `abc`)
/// becomes 1; oversized numbers become `max`.
pub fn bounded_passenger_count(raw: &str, max: usize) -> usize {
    parse_passenger_count(raw).min(max.max(1))
}

/// Parses the raw passenger-count input. Anything that is not a positive
/// integer prefix (empty, negative, `abc`) clamps to 1. Digit runs too long
/// for `usize` saturate.
pub fn parse_passenger_count(raw: &str) -> usize {
    let trimmed = raw.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();

    if negative || digits.is_empty() {
        return 1;
    }
    digits.parse::<usize>().unwrap_or(usize::MAX).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn filled(name: &str, outbound: Option<&str>, ret: Option<&str>) -> Passenger {
        Passenger {
            full_name: name.to_string(),
            birthdate: "1990-01-01".to_string(),
            passport_number: Masked::from(format!("P-{}", name)),
            nationality: "Filipino".to_string(),
            outbound_seat_number: outbound.map(str::to_string),
            return_seat_number: ret.map(str::to_string),
        }
    }

    #[test]
    fn test_grow_pads_with_empty_entries() {
        let current = vec![filled("Ana", Some("1"), None)];
        let resized = resize(&current, 3);

        assert_eq!(resized.len(), 3);
        assert_eq!(resized[0], current[0]);
        assert_eq!(resized[1], Passenger::default());
        assert_eq!(resized[2], Passenger::default());
    }

    #[test]
    fn test_shrink_three_to_one_keeps_first_entry_unchanged() {
        let current = vec![
            filled("Ana", Some("1"), Some("4")),
            filled("Ben", Some("2"), Some("5")),
            filled("Cy", Some("3"), Some("6")),
        ];
        let resized = resize(&current, 1);

        assert_eq!(resized.len(), 1);
        assert_eq!(resized[0], current[0]);
    }

    #[test]
    fn test_shrink_silently_drops_trailing_seats() {
        // Seats held by dropped passengers are released with no notice.
        let current = vec![filled("Ana", Some("1"), None), filled("Ben", Some("2"), None)];
        let shrunk = resize(&current, 1);
        let regrown = resize(&shrunk, 2);

        assert_eq!(regrown[1], Passenger::default());
        assert!(regrown.iter().all(|p| p.seat(Leg::Outbound) != Some("2")));
    }

    #[test]
    fn test_count_is_clamped_to_one() {
        assert_eq!(resize(&[], 0).len(), 1);
        assert_eq!(parse_passenger_count("0"), 1);
        assert_eq!(parse_passenger_count("-4"), 1);
        assert_eq!(parse_passenger_count(""), 1);
        assert_eq!(parse_passenger_count("abc"), 1);
        assert_eq!(parse_passenger_count(" 3 "), 3);
        assert_eq!(parse_passenger_count("2abc"), 2);
    }

    #[test]
    fn test_oversized_count_is_capped() {
        assert_eq!(parse_passenger_count("99999999999999999999999999"), usize::MAX);
        assert_eq!(bounded_passenger_count("99999999999999999", 9), 9);
        assert_eq!(bounded_passenger_count("99999999999999999999999999", 9), 9);
        assert_eq!(bounded_passenger_count("4", 9), 4);
        assert_eq!(bounded_passenger_count("-4", 9), 1);
        assert_eq!(bounded_passenger_count("3", 0), 1);

        let resized = resize(&[Passenger::default()], bounded_passenger_count("99999999999999999", 9));
        assert_eq!(resized.len(), 9);
    }

    #[test]
    fn test_manifest_line_per_trip_type() {
        let passenger = filled("Ana", None, Some("9"));

        let oneway = passenger.to_manifest(TripType::Oneway);
        assert_eq!(oneway.outbound_seat_number, "");
        assert_eq!(oneway.return_seat_number, None);

        let roundtrip = passenger.to_manifest(TripType::Roundtrip);
        assert_eq!(roundtrip.return_seat_number.as_deref(), Some("9"));
    }

    #[test]
    fn test_display_name_falls_back_to_position() {
        assert_eq!(Passenger::default().display_name(1), "Passenger 2");
        assert_eq!(filled("Ana", None, None).display_name(0), "Ana");
    }

    fn arb_passenger() -> impl Strategy<Value = Passenger> {
        (
            "[a-z]{0,8}",
            "[0-9-]{0,10}",
            "[A-Z0-9]{0,8}",
            proptest::option::of("[0-9]{1,3}"),
            proptest::option::of("[0-9]{1,3}"),
        )
            .prop_map(|(name, birthdate, passport, outbound, ret)| Passenger {
                full_name: name,
                birthdate,
                passport_number: Masked(passport),
                nationality: "Filipino".to_string(),
                outbound_seat_number: outbound,
                return_seat_number: ret,
            })
    }

    proptest! {
        #[test]
        fn prop_resize_round_trip_restores_surviving_entries(
            passengers in proptest::collection::vec(arb_passenger(), 1..8),
            n in 1usize..12,
        ) {
            let original = passengers.len();
            let there = resize(&passengers, n);
            prop_assert_eq!(there.len(), n);

            let back = resize(&there, original);
            prop_assert_eq!(back.len(), original);
            for i in 0..original.min(n) {
                prop_assert_eq!(&back[i], &passengers[i]);
            }
        }
    }
}
