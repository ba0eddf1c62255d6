mod normalizer;

pub use normalizer::ResponseNormalizer;
