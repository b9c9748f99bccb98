// ============================================================================
// Served cities, grouped the way the location picker shows them
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct City {
    pub name: &'static str,
    pub code: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Country {
    pub name: &'static str,
    pub flag_code: &'static str,
    pub cities: &'static [City],
}

#[derive(Debug, Clone, Copy)]
pub struct Region {
    pub continent: &'static str,
    pub countries: &'static [Country],
}

const fn city(name: &'static str, code: &'static str) -> City {
    City { name, code }
}

pub static REGIONS: &[Region] = &[
    Region {
        continent: "Asia",
        countries: &[
            Country {
                name: "Philippines",
                flag_code: "ph",
                cities: &[
                    city("Manila", "MNL"),
                    city("Cebu", "CEB"),
                    city("Davao", "DVO"),
                    city("Clark", "CRK"),
                ],
            },
            Country {
                name: "Japan",
                flag_code: "jp",
                cities: &[
                    city("Tokyo", "NRT"),
                    city("Osaka", "KIX"),
                    city("Nagoya", "NGO"),
                    city("Fukuoka", "FUK"),
                ],
            },
            Country {
                name: "South Korea",
                flag_code: "kr",
                cities: &[city("Seoul", "ICN"), city("Busan", "PUS")],
            },
            Country {
                name: "Singapore",
                flag_code: "sg",
                cities: &[city("Singapore", "SIN")],
            },
            Country {
                name: "Thailand",
                flag_code: "th",
                cities: &[city("Bangkok", "BKK"), city("Chiang Mai", "CNX")],
            },
        ],
    },
    Region {
        continent: "Europe",
        countries: &[
            Country {
                name: "United Kingdom",
                flag_code: "gb",
                cities: &[city("London", "LHR"), city("Manchester", "MAN")],
            },
            Country {
                name: "Germany",
                flag_code: "de",
                cities: &[city("Frankfurt", "FRA"), city("Munich", "MUC")],
            },
        ],
    },
    Region {
        continent: "North America",
        countries: &[
            Country {
                name: "United States",
                flag_code: "us",
                cities: &[
                    city("New York", "JFK"),
                    city("Los Angeles", "LAX"),
                    city("San Francisco", "SFO"),
                ],
            },
            Country {
                name: "Canada",
                flag_code: "ca",
                cities: &[city("Toronto", "YYZ"), city("Vancouver", "YVR")],
            },
        ],
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityDetails {
    pub code: String,
    pub city: String,
    pub country: Option<&'static str>,
    pub flag_url: Option<String>,
}

pub fn find_city(code: &str) -> Option<(&'static Country, &'static City)> {
    REGIONS
        .iter()
        .flat_map(|r| r.countries.iter())
        .flat_map(|country| country.cities.iter().map(move |city| (country, city)))
        .find(|(_, city)| city.code == code)
}

/// `"Manila (MNL)"` for a known code, the code itself otherwise.
pub fn city_label(code: &str) -> String {
    match find_city(code) {
        Some((_, city)) => format!("{} ({})", city.name, city.code),
        None => code.to_string(),
    }
}

/// Pulls the code out of a `"City (CODE)"` label; anything else is returned as is.
pub fn code_of(location: &str) -> &str {
    location
        .find('(')
        .and_then(|start| {
            let rest = &location[start + 1..];
            rest.find(')').map(|end| &rest[..end])
        })
        .filter(|code| !code.is_empty())
        .unwrap_or(location)
}

pub fn details(code: &str) -> CityDetails {
    match find_city(code) {
        Some((country, city)) => CityDetails {
            code: code.to_string(),
            city: city.name.to_string(),
            country: Some(country.name),
            flag_url: Some(format!("https://flagcdn.com/24x18/{}.png", country.flag_code)),
        },
        None => CityDetails {
            code: code.to_string(),
            city: code.to_string(),
            country: None,
            flag_url: None,
        },
    }
}
