pub mod analysis;

pub use analysis::AnalysisRepository;
