//! Parsers for interval lists.
//!
//! - **BED files**: `contig start end [...]`, 0-based half-open, extra columns ignored
//!
//! ## Example
//!
//! ```rust
//! use chanjo::parsing::bed::parse_bed_text;
//!
//! let intervals = parse_bed_text("1\t0\t5\n1\t9\t20\n", "chr").unwrap();
//! assert_eq!(intervals[0].to_string(), "chr1:1-5");
//! ```

pub mod bed;
