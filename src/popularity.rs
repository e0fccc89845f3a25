use crate::error::FeatureError;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// In-memory domain popularity table, loaded once at startup from a
/// two-column `rank,domain` dataset (1 = most popular) and read-only
/// afterwards. Keys are lowercase registrable domains.
#[derive(Debug, Default)]
pub struct PopularityIndex {
    ranks: HashMap<String, u32>,
}

impl PopularityIndex {
    /// Load the dataset from disk. An unreadable file is a startup error;
    /// individual malformed rows are skipped with a warning.
    pub fn load(path: &Path) -> Result<Self, FeatureError> {
        let file = File::open(path)?;
        let index = Self::from_reader(BufReader::new(file));
        log::info!(
            "Loaded popularity index: {} domains from {}",
            index.len(),
            path.display()
        );
        Ok(index)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Self {
        let mut ranks = HashMap::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    log::warn!("Skipping unreadable dataset line {}: {e}", line_no + 1);
                    continue;
                }
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some((rank, domain)) = line.split_once(',') else {
                log::warn!("Skipping malformed dataset line {}: {line}", line_no + 1);
                continue;
            };
            let Ok(rank) = rank.trim().parse::<u32>() else {
                log::warn!("Skipping dataset line {} with bad rank: {line}", line_no + 1);
                continue;
            };
            let domain = domain.trim().to_lowercase();
            if domain.is_empty() {
                continue;
            }
            ranks.insert(domain, rank);
        }
        Self { ranks }
    }

    /// Rank of a registrable domain, if present. Case-insensitive.
    pub fn rank(&self, registrable_domain: &str) -> Option<u32> {
        self.ranks.get(&registrable_domain.to_lowercase()).copied()
    }

    pub fn contains(&self, registrable_domain: &str) -> bool {
        self.rank(registrable_domain).is_some()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample() -> PopularityIndex {
        let data = "1,google.com\n2,Youtube.com\n50000,example.com\n";
        PopularityIndex::from_reader(Cursor::new(data))
    }

    #[test]
    fn test_lookup() {
        let index = sample();
        assert_eq!(index.rank("google.com"), Some(1));
        assert_eq!(index.rank("example.com"), Some(50000));
        assert_eq!(index.rank("missing.net"), None);
        assert!(index.contains("google.com"));
        assert!(!index.contains("missing.net"));
    }

    #[test]
    fn test_case_insensitive() {
        let index = sample();
        assert_eq!(index.rank("YouTube.com"), Some(2));
        assert_eq!(index.rank("GOOGLE.COM"), Some(1));
    }

    #[test]
    fn test_lookup_is_idempotent() {
        let index = sample();
        assert_eq!(index.rank("google.com"), index.rank("google.com"));
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let data = "1,google.com\nnot-a-row\nx,bad-rank.com\n3,\n4,ok.com\n";
        let index = PopularityIndex::from_reader(Cursor::new(data));
        assert_eq!(index.len(), 2);
        assert_eq!(index.rank("ok.com"), Some(4));
    }
}
