pub mod errors;
pub mod db;
pub mod section;

#[cfg(test)]
mod tests;
