pub mod extract;
pub mod lexicon;
pub mod normalize;
pub mod patterns;
pub mod suggest;
mod window;
