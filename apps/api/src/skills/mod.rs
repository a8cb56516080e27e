pub mod extractor;
pub mod vocabulary;

pub use extractor::SkillExtractor;
pub use vocabulary::Vocabulary;
