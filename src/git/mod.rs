/// Finding the unique repositories below a scan root.
pub mod discover;

/// Collecting a repository's qualifying commits for the report.
pub mod hist;

#[cfg(test)]
pub(crate) mod fixtures;
