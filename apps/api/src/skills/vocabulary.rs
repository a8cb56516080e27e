/// Built-in skill keywords. Order matters: among equally long matches the
/// earlier entry wins.
pub const BUILTIN_SKILLS: &[&str] = &[
    "python", "java", "javascript", "c++", "c#", "php", "ruby", "swift", "kotlin",
    "html", "css", "react", "angular", "vue", "node.js", "django", "flask", "laravel",
    "machine learning", "deep learning", "ai", "data analysis", "data science",
    "sql", "mysql", "postgresql", "mongodb", "oracle", "aws", "azure", "google cloud",
    "docker", "kubernetes", "git", "jenkins", "ci/cd", "rest api", "graphql",
    "project management", "agile", "scrum", "devops", "cybersecurity", "networking",
    "linux", "windows server", "bash", "powershell", "excel", "tableau", "power bi",
    "photoshop", "illustrator", "ui/ux", "figma", "adobe xd", "seo", "digital marketing",
];

/// An ordered, immutable list of lowercase skill keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    entries: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(BUILTIN_SKILLS.iter().copied())
    }
}

impl Vocabulary {
    /// Entries are lowercased and trimmed; blanks and repeats are dropped,
    /// keeping first-seen order.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for entry in entries {
            let entry = entry.as_ref().trim().to_lowercase();
            if !entry.is_empty() && !unique.contains(&entry) {
                unique.push(entry);
            }
        }
        Self { entries: unique }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.entries.iter().any(|e| e == skill)
    }

    /// True if any entry occurs inside `text`.
    pub fn matches_any(&self, text: &str) -> bool {
        self.entries.iter().any(|e| text.contains(e.as_str()))
    }

    /// The longest entry occurring inside `candidate`; the first such entry on
    /// equal length.
    pub fn canonical_match(&self, candidate: &str) -> Option<&str> {
        let mut best: Option<&str> = None;
        for entry in &self.entries {
            if candidate.contains(entry.as_str()) && best.map_or(true, |b| entry.len() > b.len()) {
                best = Some(entry.as_str());
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_vocabulary_is_lowercase_and_unique() {
        let vocab = Vocabulary::default();
        assert_eq!(vocab.len(), BUILTIN_SKILLS.len());
        assert!(vocab.entries().iter().all(|e| e.to_lowercase() == *e));
    }

    #[test]
    fn test_new_normalizes_entries() {
        let vocab = Vocabulary::new(["  Rust ", "rust", "", "Go"]);
        assert_eq!(vocab.entries(), ["rust", "go"]);
    }

    #[test]
    fn test_canonical_match_prefers_longest() {
        let vocab = Vocabulary::new(["java", "javascript", "sql", "mysql"]);
        assert_eq!(vocab.canonical_match("javascript developer"), Some("javascript"));
        assert_eq!(vocab.canonical_match("mysql"), Some("mysql"));
        assert_eq!(vocab.canonical_match("java"), Some("java"));
        assert_eq!(vocab.canonical_match("haskell"), None);
    }

    #[test]
    fn test_canonical_match_tie_goes_to_first_entry() {
        let vocab = Vocabulary::new(["css", "sql"]);
        assert_eq!(vocab.canonical_match("sql and css"), Some("css"));
        let vocab = Vocabulary::new(["sql", "css"]);
        assert_eq!(vocab.canonical_match("sql and css"), Some("sql"));
    }

    #[test]
    fn test_matching_ignores_word_boundaries() {
        let vocab = Vocabulary::default();
        assert!(vocab.matches_any("maintained"));
        assert_eq!(vocab.canonical_match("maintained"), Some("ai"));
    }
}
