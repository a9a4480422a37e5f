/// Greedy exclusive tile assignment engine
pub mod assignment;
/// Visitation order policies
pub mod order;
/// Rotation-aware cosine similarity
pub mod similarity;
/// Lock and layout consistency checks
pub mod validation;
