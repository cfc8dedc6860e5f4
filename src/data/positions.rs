use std::fmt;

// ---------------------------------------------------------------------------
// Position code → macro-position
// ---------------------------------------------------------------------------

/// Coarse role grouping derived from a fine-grained position code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacroPosition {
    Goalkeeper,
    CentreBack,
    LeftBack,
    RightBack,
    DefensiveMidfielder,
    CentralMidfielder,
    AttackingMidfielder,
    Winger,
    Forward,
}

/// The fixed code table, as exported by Driblab.
const POSITION_TABLE: [(&str, MacroPosition); 14] = [
    ("GK", MacroPosition::Goalkeeper),
    ("DC", MacroPosition::CentreBack),
    ("DL", MacroPosition::LeftBack),
    ("DR", MacroPosition::RightBack),
    ("DMC", MacroPosition::DefensiveMidfielder),
    ("MC", MacroPosition::CentralMidfielder),
    ("ML", MacroPosition::CentralMidfielder),
    ("MR", MacroPosition::CentralMidfielder),
    ("AMC", MacroPosition::AttackingMidfielder),
    ("AML", MacroPosition::Winger),
    ("AMR", MacroPosition::Winger),
    ("FW", MacroPosition::Forward),
    ("CF", MacroPosition::Forward),
    ("ST", MacroPosition::Forward),
];

impl MacroPosition {
    /// Look up a position code. Codes are matched exactly (cells are already
    /// trimmed by the loader); unknown codes have no macro-position.
    pub fn from_code(code: &str) -> Option<Self> {
        POSITION_TABLE
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, m)| *m)
    }

    /// Label shown in the selector.
    pub fn label(self) -> &'static str {
        match self {
            MacroPosition::Goalkeeper => "Arquero",
            MacroPosition::CentreBack => "Defensor Central",
            MacroPosition::LeftBack => "Lateral Izquierdo",
            MacroPosition::RightBack => "Lateral Derecho",
            MacroPosition::DefensiveMidfielder => "Mediocampista Defensivo",
            MacroPosition::CentralMidfielder => "Mediocampista Mixto",
            MacroPosition::AttackingMidfielder => "Mediocampista Ofensivo",
            MacroPosition::Winger => "Extremo",
            MacroPosition::Forward => "Delantero",
        }
    }

    /// Every position code that maps to this group.
    pub fn codes(self) -> impl Iterator<Item = &'static str> {
        POSITION_TABLE
            .iter()
            .filter(move |(_, m)| *m == self)
            .map(|(c, _)| *c)
    }
}

impl fmt::Display for MacroPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Options are presented sorted by label, so order by label too.
impl PartialOrd for MacroPosition {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MacroPosition {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.label().cmp(other.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goalkeeper_maps_to_arquero() {
        assert_eq!(MacroPosition::from_code("GK"), Some(MacroPosition::Goalkeeper));
        assert_eq!(MacroPosition::Goalkeeper.label(), "Arquero");
    }

    #[test]
    fn unknown_and_untrimmed_codes_do_not_map() {
        assert_eq!(MacroPosition::from_code("XX"), None);
        assert_eq!(MacroPosition::from_code(""), None);
        assert_eq!(MacroPosition::from_code("gk"), None);
    }

    #[test]
    fn forward_group_collects_three_codes() {
        let codes: Vec<_> = MacroPosition::Forward.codes().collect();
        assert_eq!(codes, vec!["FW", "CF", "ST"]);
        let mixed: Vec<_> = MacroPosition::CentralMidfielder.codes().collect();
        assert_eq!(mixed, vec!["MC", "ML", "MR"]);
    }

    #[test]
    fn table_has_fourteen_codes_and_nine_groups() {
        assert_eq!(POSITION_TABLE.len(), 14);
        let mut groups: Vec<_> = POSITION_TABLE.iter().map(|(_, m)| *m).collect();
        groups.sort();
        groups.dedup();
        assert_eq!(groups.len(), 9);
    }

    #[test]
    fn ordering_follows_labels() {
        let mut all = vec![
            MacroPosition::Forward,
            MacroPosition::Goalkeeper,
            MacroPosition::Winger,
            MacroPosition::CentreBack,
        ];
        all.sort();
        let labels: Vec<_> = all.iter().map(|m| m.label()).collect();
        assert_eq!(labels, vec!["Arquero", "Defensor Central", "Delantero", "Extremo"]);
    }
}
