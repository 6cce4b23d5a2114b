//! Parsing compound lists and annotation tables from plain-text files
//!
//! The enrichment core itself does no I/O; these parsers cover the two
//! inputs that are typically file-based: the user's query (and
//! optionally background) compound list and a flattened
//! compound-to-category annotation table.

/// Parses newline-delimited compound lists
///
/// One compound identifier per line. Surrounding whitespace is
/// trimmed, blank lines are skipped and duplicate identifiers collapse
/// into one.
pub mod compound_list {
    use std::fs::File;
    use std::io::BufRead;
    use std::io::BufReader;
    use std::path::Path;

    use tracing::debug;

    use crate::CompoundSet;
    use crate::MseaError;
    use crate::MseaResult;

    /// Reads a compound list from a buffered reader
    ///
    /// An empty result is not an error at this layer; callers decide
    /// whether an empty query or background set is acceptable.
    ///
    /// # Errors
    ///
    /// [`MseaError::InvalidInput`] if a line cannot be read
    pub fn from_reader<R: BufRead>(reader: R) -> MseaResult<CompoundSet> {
        let mut compounds = CompoundSet::new();
        for line in reader.lines() {
            let line =
                line.map_err(|err| MseaError::InvalidInput(err.to_string()))?;
            let compound = line.trim();
            if compound.is_empty() {
                continue;
            }
            compounds.insert(compound);
        }
        debug!("Parsed {} unique compounds", compounds.len());
        Ok(compounds)
    }

    /// Reads a compound list from a file
    ///
    /// # Errors
    ///
    /// - [`MseaError::CannotOpenFile`] if the file is not readable
    /// - [`MseaError::InvalidInput`] if a line cannot be read
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use msea::parser::compound_list;
    ///
    /// let query = compound_list::from_file("query.txt").unwrap();
    /// println!("{} compounds", query.len());
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> MseaResult<CompoundSet> {
        let file = File::open(&path).map_err(|_| {
            MseaError::CannotOpenFile(path.as_ref().display().to_string())
        })?;
        from_reader(BufReader::new(file))
    }

}

/// Parses two-column annotation tables into an [`AnnotationCatalog`]
///
/// Each line associates one compound with one category:
///
/// ```text
/// # compound <TAB> category
/// CHEBI:15377	glycolysis
/// CHEBI:17234	glycolysis
/// CHEBI:17234	TCA cycle
/// ```
///
/// Categories appear in the catalog in the order of their first row,
/// which also fixes the order of the enrichment result rows.
///
/// [`AnnotationCatalog`]: crate::annotations::AnnotationCatalog
pub mod annotation_table {
    use std::collections::HashMap;
    use std::fs::File;
    use std::io::BufRead;
    use std::io::BufReader;
    use std::path::Path;

    use tracing::debug;

    use crate::annotations::{AnnotationCatalog, Category};
    use crate::CompoundSet;
    use crate::MseaError;
    use crate::MseaResult;

    /// Reads an annotation table from a buffered reader
    ///
    /// Lines starting with `#` are skipped.
    ///
    /// # Errors
    ///
    /// [`MseaError::InvalidInput`] on rows without a tab separator or
    /// with an empty compound or category column
    pub fn from_reader<R: BufRead>(reader: R) -> MseaResult<AnnotationCatalog> {
        let mut order: Vec<String> = Vec::new();
        let mut members: HashMap<String, CompoundSet> = HashMap::new();

        for line in reader.lines() {
            let line =
                line.map_err(|err| MseaError::InvalidInput(err.to_string()))?;
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            let (compound, category) = parse_row(&line)?;
            members
                .entry(category.to_string())
                .or_insert_with(|| {
                    order.push(category.to_string());
                    CompoundSet::new()
                })
                .insert(compound);
        }

        let mut catalog = AnnotationCatalog::new();
        for name in order {
            let compounds = members
                .remove(&name)
                .expect("every ordered name has a member set");
            catalog.insert(Category::new(&name, compounds))?;
        }
        debug!("Parsed catalog with {} categories", catalog.len());
        Ok(catalog)
    }

    /// Reads an annotation table from a file
    ///
    /// # Errors
    ///
    /// - [`MseaError::CannotOpenFile`] if the file is not readable
    /// - [`MseaError::InvalidInput`] on malformed rows
    pub fn from_file<P: AsRef<Path>>(path: P) -> MseaResult<AnnotationCatalog> {
        let file = File::open(&path).map_err(|_| {
            MseaError::CannotOpenFile(path.as_ref().display().to_string())
        })?;
        from_reader(BufReader::new(file))
    }

    /// Splits one row into its compound and category columns
    fn parse_row(line: &str) -> MseaResult<(&str, &str)> {
        let Some((compound, category)) = line.split_once('\t') else {
            return Err(MseaError::InvalidInput(line.to_string()));
        };
        let compound = compound.trim();
        let category = category.trim();
        if compound.is_empty() || category.is_empty() {
            return Err(MseaError::InvalidInput(line.to_string()));
        }
        Ok((compound, category))
    }

}
