mod normalizer;

pub use normalizer::TagNormalizer;
