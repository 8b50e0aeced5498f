pub mod matrix;
pub mod terminal;

#[cfg(test)]
pub mod fake;
