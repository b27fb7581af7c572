//! Static name tables. Literal substitutions only; names are never normalized.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Historical or composite geo labels and the present-day names they cover.
pub const COUNTRY_GROUPS: &[(&str, &[&str])] = &[
    (
        "USSR",
        &[
            "Armenia",
            "Azerbaijan",
            "Belarus",
            "Estonia",
            "Georgia",
            "Kazakhstan",
            "Kyrgyzstan",
            "Latvia",
            "Lithuania",
            "Moldova",
            "Russia",
            "Tajikistan",
            "Turkmenistan",
            "Ukraine",
            "Uzbekistan",
        ],
    ),
    (
        "Yugoslavia",
        &[
            "Bosnia and Herzegovina",
            "Croatia",
            "Kosovo",
            "Montenegro",
            "Macedonia",
            "Republic of Serbia",
            "Slovenia",
        ],
    ),
    ("Czechoslovakia", &["Czechia", "Slovakia"]),
    ("Serbia", &["Republic of Serbia"]),
    ("Tanzania", &["United Republic of Tanzania"]),
    ("Palestine", &["Gaza", "West Bank"]),
];

/// Immutable label → names lookup. Expansion never recurses.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    groups: HashMap<String, Vec<String>>,
}

static BUILTIN: LazyLock<AliasTable> = LazyLock::new(|| AliasTable::from_pairs(COUNTRY_GROUPS));

impl AliasTable {
    /// Process-wide table built from [`COUNTRY_GROUPS`].
    pub fn builtin() -> &'static AliasTable {
        &BUILTIN
    }

    pub fn from_pairs<L, N>(pairs: &[(L, &[N])]) -> Self
    where
        L: AsRef<str>,
        N: AsRef<str>,
    {
        let groups = pairs
            .iter()
            .map(|(label, names)| {
                (
                    label.as_ref().to_string(),
                    names.iter().map(|n| n.as_ref().to_string()).collect(),
                )
            })
            .collect();
        Self { groups }
    }

    /// The group's names when `label` is aliased, otherwise `[label]`.
    pub fn expand<'a>(&'a self, label: &'a str) -> Vec<&'a str> {
        match self.groups.get(label) {
            Some(names) => names.iter().map(String::as_str).collect(),
            None => vec![label],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Current FIFA member associations and their codes.
pub const ASSOCIATIONS: &[(&str, &str)] = &[
    ("Afghanistan", "AFG"),
    ("Albania", "ALB"),
    ("Algeria", "ALG"),
    ("American Samoa", "ASA"),
    ("Andorra", "AND"),
    ("Angola", "ANG"),
    ("Anguilla", "AIA"),
    ("Antigua & Barbuda", "ATG"),
    ("Argentina", "ARG"),
    ("Armenia", "ARM"),
    ("Aruba", "ARU"),
    ("Australia", "AUS"),
    ("Austria", "AUT"),
    ("Azerbaijan", "AZE"),
    ("Bahamas", "BAH"),
    ("Bahrain", "BHR"),
    ("Bangladesh", "BAN"),
    ("Barbados", "BRB"),
    ("Belarus", "BLR"),
    ("Belgium", "BEL"),
    ("Belize", "BLZ"),
    ("Benin", "BEN"),
    ("Bermuda", "BER"),
    ("Bhutan", "BHU"),
    ("Bolivia", "BOL"),
    ("Bosnia & Herzegovina", "BIH"),
    ("Botswana", "BOT"),
    ("Brazil", "BRA"),
    ("British Virgin Islands", "VGB"),
    ("Brunei", "BRU"),
    ("Bulgaria", "BUL"),
    ("Burkina Faso", "BFA"),
    ("Burundi", "BDI"),
    ("Cape Verde", "CPV"),
    ("Cambodia", "CAM"),
    ("Cameroon", "CMR"),
    ("Canada", "CAN"),
    ("Cayman Islands", "CAY"),
    ("Central African Republic", "CTA"),
    ("Chad", "CHA"),
    ("Chile", "CHI"),
    ("China", "CHN"),
    ("Chinese Taipei", "TPE"),
    ("Colombia", "COL"),
    ("Comoros", "COM"),
    ("Congo", "CGO"),
    ("Congo DR", "COD"),
    ("Cook Islands", "COK"),
    ("Costa Rica", "CRC"),
    ("Ivory Coast", "CIV"),
    ("Croatia", "CRO"),
    ("Cuba", "CUB"),
    ("Curaçao", "CUW"),
    ("Cyprus", "CYP"),
    ("Czech Republic", "CZE"),
    ("Denmark", "DEN"),
    ("Djibouti", "DJI"),
    ("Dominica", "DMA"),
    ("Dominican Republic", "DOM"),
    ("Ecuador", "ECU"),
    ("Egypt", "EGY"),
    ("El Salvador", "SLV"),
    ("England", "ENG"),
    ("Equatorial Guinea", "EQG"),
    ("Eritrea", "ERI"),
    ("Estonia", "EST"),
    ("eSwatini", "SWZ"),
    ("Ethiopia", "ETH"),
    ("Faroe Islands", "FRO"),
    ("Fiji", "FIJ"),
    ("Finland", "FIN"),
    ("France", "FRA"),
    ("Gabon", "GAB"),
    ("Gambia", "GAM"),
    ("Georgia", "GEO"),
    ("Germany", "GER"),
    ("Ghana", "GHA"),
    ("Gibraltar", "GIB"),
    ("Greece", "GRE"),
    ("Grenada", "GRN"),
    ("Guam", "GUM"),
    ("Guatemala", "GUA"),
    ("Guinea", "GUI"),
    ("Guinea-Bissau", "GNB"),
    ("Guyana", "GUY"),
    ("Haiti", "HAI"),
    ("Honduras", "HON"),
    ("Hong Kong", "HKG"),
    ("Hungary", "HUN"),
    ("Iceland", "ISL"),
    ("India", "IND"),
    ("Indonesia", "IDN"),
    ("Iran", "IRN"),
    ("Iraq", "IRQ"),
    ("Israel", "ISR"),
    ("Italy", "ITA"),
    ("Jamaica", "JAM"),
    ("Japan", "JPN"),
    ("Jordan", "JOR"),
    ("Kazakhstan", "KAZ"),
    ("Kenya", "KEN"),
    ("North Korea", "PRK"),
    ("South Korea", "KOR"),
    ("Kosovo", "KVX"),
    ("Kuwait", "KUW"),
    ("Kyrgyzstan", "KGZ"),
    ("Laos", "LAO"),
    ("Latvia", "LVA"),
    ("Lebanon", "LBN"),
    ("Lesotho", "LES"),
    ("Liberia", "LBR"),
    ("Libya", "LBY"),
    ("Liechtenstein", "LIE"),
    ("Lithuania", "LTU"),
    ("Luxembourg", "LUX"),
    ("Macau", "MAC"),
    ("Madagascar", "MAD"),
    ("Malawi", "MWI"),
    ("Malaysia", "MAS"),
    ("Maldives", "MDV"),
    ("Mali", "MLI"),
    ("Malta", "MLT"),
    ("Mauritania", "MTN"),
    ("Mauritius", "MRI"),
    ("Mexico", "MEX"),
    ("Moldova", "MDA"),
    ("Mongolia", "MNG"),
    ("Montenegro", "MNE"),
    ("Montserrat", "MSR"),
    ("Morocco", "MAR"),
    ("Mozambique", "MOZ"),
    ("Myanmar", "MYA"),
    ("Namibia", "NAM"),
    ("Nepal", "NEP"),
    ("Netherlands", "NED"),
    ("New Caledonia", "NCL"),
    ("New Zealand", "NZL"),
    ("Nicaragua", "NCA"),
    ("Niger", "NIG"),
    ("Nigeria", "NGA"),
    ("North Macedonia", "MKD"),
    ("Northern Ireland", "NIR"),
    ("Norway", "NOR"),
    ("Oman", "OMA"),
    ("Pakistan", "PAK"),
    ("Palestine", "PLE"),
    ("Panama", "PAN"),
    ("Papua New Guinea", "PNG"),
    ("Paraguay", "PAR"),
    ("Peru", "PER"),
    ("Philippines", "PHI"),
    ("Poland", "POL"),
    ("Portugal", "POR"),
    ("Puerto Rico", "PUR"),
    ("Qatar", "QAT"),
    ("Republic of Ireland", "IRL"),
    ("Romania", "ROU"),
    ("Russia", "RUS"),
    ("Rwanda", "RWA"),
    ("Samoa", "SAM"),
    ("San Marino", "SMR"),
    ("São Tomé & Príncipe", "STP"),
    ("Saudi Arabia", "KSA"),
    ("Scotland", "SCO"),
    ("Senegal", "SEN"),
    ("Serbia", "SRB"),
    ("Seychelles", "SEY"),
    ("Sierra Leone", "SLE"),
    ("Singapore", "SIN"),
    ("Slovakia", "SVK"),
    ("Slovenia", "SVN"),
    ("Solomon Islands", "SOL"),
    ("Somalia", "SOM"),
    ("South Africa", "RSA"),
    ("South Sudan", "SSD"),
    ("Spain", "ESP"),
    ("Sri Lanka", "SRI"),
    ("Saint Kitts & Nevis", "SKN"),
    ("Saint Lucia", "LCA"),
    ("Saint Vincent & the Grenadines", "VIN"),
    ("Sudan", "SDN"),
    ("Suriname", "SUR"),
    ("Sweden", "SWE"),
    ("Switzerland", "SUI"),
    ("Syria", "SYR"),
    ("Tahiti", "TAH"),
    ("Tajikistan", "TJK"),
    ("Tanzania", "TAN"),
    ("Thailand", "THA"),
    ("Timor-Leste", "TLS"),
    ("Togo", "TOG"),
    ("Tonga", "TGA"),
    ("Trinidad & Tobago", "TRI"),
    ("Tunisia", "TUN"),
    ("Turkey", "TUR"),
    ("Turkmenistan", "TKM"),
    ("Turks & Caicos Islands", "TCA"),
    ("Uganda", "UGA"),
    ("Ukraine", "UKR"),
    ("United Arab Emirates", "UAE"),
    ("Uruguay", "URU"),
    ("US Virgin Islands", "VIR"),
    ("USA", "USA"),
    ("Uzbekistan", "UZB"),
    ("Vanuatu", "VAN"),
    ("Venezuela", "VEN"),
    ("Vietnam", "VIE"),
    ("Wales", "WAL"),
    ("Yemen", "YEM"),
    ("Zambia", "ZAM"),
    ("Zimbabwe", "ZIM"),
];

/// Section-heading association names mapped to current members.
/// `None`: the association has no current successor and is skipped.
pub const ASSOCIATION_RENAMES: &[(&str, Option<&str>)] = &[
    ("Ireland (Northern Ireland)", Some("Northern Ireland")),
    ("Bohemia (Czech Republic)", Some("Czech Republic")),
    ("United States", Some("USA")),
    ("China PR", Some("China")),
    ("Soviet Union", Some("USSR")),
    ("Palestine, British Mandate", None),
    ("South Vietnam", Some("Vietnam")),
    ("Saarland", None),
    ("East Germany", None),
    ("North Vietnam", Some("Vietnam")),
    ("South Yemen", Some("Yemen")),
    ("(North) Yemen", Some("Yemen")),
    ("Swaziland", Some("eSwatini")),
    ("Macedonia", Some("North Macedonia")),
    ("U.S. Virgin Islands", Some("US Virgin Islands")),
];

/// Team-link titles mapped to the names used in the output.
pub const TEAM_RENAMES: &[(&str, &str)] = &[
    ("Ireland (1882–1950)", "Northern Ireland"),
    ("Czechoslovakia", "Czech Republic"),
    ("Russian Empire", "Russia"),
    ("China PR", "China"),
    ("Malaya", "Malaysia"),
    ("Belgian Congo", "Congo DR"),
    ("Yemen", "Yemen"),
    ("South Yemen", "Yemen"),
    ("Saint Christopher-Nevis-Anguilla", "Saint Kitts & Nevis"),
    ("Macedonia", "Macedonia"),
    ("United States Virgin Islands", "US Virgin Islands"),
    ("United States", "USA"),
    ("Swaziland", "eSwatini"),
    ("North Vietnam", "Vietnam"),
    ("South Vietnam", "Vietnam"),
    ("Soviet Union", "USSR"),
];

/// Debuting associations whose match lists them under a successor's name.
/// `(association, team name used in the match)`.
pub const RESTORED_DEBUTS: &[(&str, &str)] = &[("Czechoslovakia", "Czech Republic")];

/// Names spelt with "and" in titles but with "&" in the association list.
pub const AMPERSAND_NAMES: &[(&str, &str)] = &[
    ("Trinidad and Tobago", "Trinidad & Tobago"),
    ("Antigua and Barbuda", "Antigua & Barbuda"),
    ("São Tomé and Príncipe", "São Tomé & Príncipe"),
    (
        "Saint Vincent and the Grenadines",
        "Saint Vincent & the Grenadines",
    ),
    ("Wallis and Futuna", "Wallis & Futuna"),
    ("Bosnia and Herzegovina", "Bosnia & Herzegovina"),
    ("Turks and Caicos Islands", "Turks & Caicos Islands"),
];

/// Suffixes stripped from team-link titles.
pub const TEAM_SUFFIXES: &[&str] = &[
    " men's national soccer team",
    " national football team",
    " national soccer team",
];

pub fn ands_to_ampersand(text: &str) -> String {
    AMPERSAND_NAMES
        .iter()
        .fold(text.to_string(), |acc, (and, amp)| acc.replace(and, amp))
}

/// Strip team suffixes, then apply [`TEAM_RENAMES`].
pub fn clean_team_name(title: &str) -> String {
    let stripped = TEAM_SUFFIXES
        .iter()
        .fold(title.to_string(), |acc, suffix| acc.replace(suffix, ""));
    TEAM_RENAMES
        .iter()
        .find(|(from, _)| *from == stripped)
        .map(|(_, to)| to.to_string())
        .unwrap_or(stripped)
}

/// Map a heading association name; `None` when it has no successor.
pub fn rename_association(name: &str) -> Option<String> {
    match ASSOCIATION_RENAMES.iter().find(|(from, _)| *from == name) {
        Some((_, to)) => to.map(String::from),
        None => Some(name.to_string()),
    }
}

pub fn is_current_member(name: &str) -> bool {
    ASSOCIATIONS.iter().any(|(n, _)| *n == name)
}
