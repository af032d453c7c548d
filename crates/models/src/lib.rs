pub mod errors;
pub mod db;
pub mod sequence;

#[cfg(test)]
mod tests;
