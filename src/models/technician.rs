use serde::{Deserialize, Serialize};

/// A field technician from the reference catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technician {
    pub name: String,
    /// Location code of the market the technician works in (e.g. `BHM`).
    pub market: String,
    #[serde(rename = "techId")]
    pub tech_id: String,
}

impl Technician {
    pub fn new(name: &str, market: &str, tech_id: &str) -> Self {
        Self {
            name: name.to_string(),
            market: market.to_string(),
            tech_id: tech_id.to_string(),
        }
    }

    /// Two-character suffix used in invoice numbers: the last two characters
    /// of the technician id, upper-cased and left-padded with `0`.
    ///
    /// `"12"` → `12`, `"7"` → `07`, `"T1045"` → `45`.
    pub fn suffix(&self) -> String {
        let id: Vec<char> = self.tech_id.trim().chars().collect();
        let tail: String = id[id.len().saturating_sub(2)..].iter().collect();
        format!("{:0>2}", tail.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_is_always_two_chars() {
        assert_eq!(Technician::new("Jane Doe", "BHM", "12").suffix(), "12");
        assert_eq!(Technician::new("A", "TPA", "7").suffix(), "07");
        assert_eq!(Technician::new("B", "JAX", "t1045").suffix(), "45");
        assert_eq!(Technician::new("C", "JAX", "x9ab").suffix(), "AB");
    }
}
