/// Plain-text edge lists: one `u v` pair per line, whitespace-separated,
/// trailing columns (weights, timestamps) ignored, `%`/`#` comment lines
/// skipped. `.gz` and `.bz2` files are decompressed transparently.
pub mod edge_list {
    use std::fs::File;
    use std::io::{BufRead, BufReader, Read};
    use std::path::{Path, PathBuf};

    use bzip2::read::BzDecoder;
    use flate2::read::GzDecoder;
    use rand::Rng;

    use eddy_core::{Edge, TriangleStream};

    use crate::error::MiningError;

    #[derive(Debug, Clone)]
    pub struct EdgeListLoader {
        path: PathBuf,
        comment_prefixes: Vec<char>,
    }

    /// Outcome of one load: items fed to the stream vs. items dropped
    /// (malformed lines and self-loops).
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct LoadReport {
        pub processed: u64,
        pub skipped: u64,
    }

    impl EdgeListLoader {
        pub fn new<P: Into<PathBuf>>(path: P) -> Self {
            EdgeListLoader {
                path: path.into(),
                comment_prefixes: vec!['%', '#'],
            }
        }

        pub fn with_comment_prefixes(mut self, prefixes: &[char]) -> Self {
            self.comment_prefixes = prefixes.to_vec();
            self
        }

        /// Feeds every edge of the file into `stream`, strictly in file
        /// order. Bad items are skipped and counted, never fatal.
        pub fn load_into<R: Rng>(
            &self,
            stream: &mut TriangleStream<R>,
        ) -> Result<LoadReport, MiningError> {
            let mut report = LoadReport::default();
            for line in self.reader()?.lines() {
                let line = line?;
                let item = line.trim();
                if self.is_noise(item) {
                    continue;
                }
                match Self::parse_pair(item) {
                    Some((u, v)) => match stream.process_pair(u, v) {
                        Ok(_) => report.processed += 1,
                        Err(err) => {
                            log::warn!("skipping stream item {item:?}: {err}");
                            report.skipped += 1;
                        }
                    },
                    None => {
                        log::warn!("skipping malformed line {item:?}");
                        report.skipped += 1;
                    }
                }
            }
            Ok(report)
        }

        /// Materialises the well-formed edges of the file without feeding a
        /// stream.
        pub fn edges(&self) -> Result<Vec<Edge>, MiningError> {
            let mut edges = Vec::new();
            for line in self.reader()?.lines() {
                let line = line?;
                let item = line.trim();
                if self.is_noise(item) {
                    continue;
                }
                if let Some((u, v)) = Self::parse_pair(item) {
                    if let Ok(e) = Edge::new(u, v) {
                        edges.push(e);
                    }
                }
            }
            Ok(edges)
        }

        fn is_noise(&self, item: &str) -> bool {
            item.is_empty() || self.comment_prefixes.iter().any(|p| item.starts_with(*p))
        }

        fn parse_pair(item: &str) -> Option<(u64, u64)> {
            let mut fields = item.split_whitespace();
            let u = fields.next()?.parse().ok()?;
            let v = fields.next()?.parse().ok()?;
            Some((u, v))
        }

        fn reader(&self) -> Result<Box<dyn BufRead>, MiningError> {
            let file = File::open(&self.path)?;
            let raw: Box<dyn Read> = match extension(&self.path) {
                Some("gz") => Box::new(GzDecoder::new(file)),
                Some("bz2") => Box::new(BzDecoder::new(file)),
                _ => Box::new(file),
            };
            Ok(Box::new(BufReader::new(raw)))
        }
    }

    fn extension(path: &Path) -> Option<&str> {
        path.extension().and_then(|e| e.to_str())
    }
}

/// Delimited records: the caller maps each deserialised record to an id
/// pair, or drops it.
pub mod csv {
    use std::fs::File;
    use std::io::{self, BufReader};
    use std::path::PathBuf;

    use flate2::read::GzDecoder;
    use rand::Rng;
    use serde::de::DeserializeOwned;

    use eddy_core::TriangleStream;

    use super::edge_list::LoadReport;
    use crate::error::MiningError;

    #[derive(Debug, Clone)]
    pub struct CsvEdgeLoader {
        path: PathBuf,
        header: bool,
        delimiter: u8,
    }

    impl CsvEdgeLoader {
        pub fn new<P: Into<PathBuf>>(path: P) -> Self {
            CsvEdgeLoader {
                path: path.into(),
                header: false,
                delimiter: b',',
            }
        }

        pub fn set_header(mut self, header: bool) -> Self {
            self.header = header;
            self
        }

        pub fn set_delimiter(mut self, delimiter: u8) -> Self {
            self.delimiter = delimiter;
            self
        }

        /// Deserialises every record, maps it through `to_edge` and feeds the
        /// resulting pairs into `stream` in record order.
        pub fn load_into<R, REC, F>(
            &self,
            stream: &mut TriangleStream<R>,
            mut to_edge: F,
        ) -> Result<LoadReport, MiningError>
        where
            R: Rng,
            REC: DeserializeOwned,
            F: FnMut(REC) -> Option<(u64, u64)>,
        {
            let mut report = LoadReport::default();
            let mut reader = self.reader()?;
            for record in reader.deserialize::<REC>() {
                match to_edge(record?) {
                    Some((u, v)) => match stream.process_pair(u, v) {
                        Ok(_) => report.processed += 1,
                        Err(err) => {
                            log::warn!("skipping csv record ({u}, {v}): {err}");
                            report.skipped += 1;
                        }
                    },
                    None => report.skipped += 1,
                }
            }
            Ok(report)
        }

        fn reader(&self) -> Result<::csv::Reader<Box<dyn io::Read>>, MiningError> {
            let is_gzipped = self
                .path
                .file_name()
                .and_then(|name| name.to_str())
                .filter(|name| name.ends_with(".gz"))
                .is_some();

            let file = File::open(&self.path)?;
            let raw: Box<dyn io::Read> = if is_gzipped {
                Box::new(BufReader::new(GzDecoder::new(file)))
            } else {
                Box::new(file)
            };
            Ok(::csv::ReaderBuilder::new()
                .has_headers(self.header)
                .delimiter(self.delimiter)
                .from_reader(raw))
        }
    }
}

#[cfg(test)]
mod loader_tests {
    use std::fs::File;
    use std::io::Write;

    use flate2::write::GzEncoder;
    use flate2::Compression;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use tempdir::TempDir;

    use eddy_core::{TriangleStream, Variant};

    use super::csv::CsvEdgeLoader;
    use super::edge_list::{EdgeListLoader, LoadReport};

    const EDGE_LIST: &str = "% konect-style header\n\
                             1 2\n\
                             2 3 14 1091\n\
                             not-an-edge\n\
                             4 4\n\
                             \n\
                             1 3\n";

    #[test]
    fn plain_edge_list_feeds_the_stream() {
        let dir = TempDir::new("eddy-loaders").unwrap();
        let path = dir.path().join("tiny.txt");
        File::create(&path)
            .unwrap()
            .write_all(EDGE_LIST.as_bytes())
            .unwrap();

        let mut stream = TriangleStream::from_seed(10, Variant::Base, 1).unwrap();
        let report = EdgeListLoader::new(&path).load_into(&mut stream).unwrap();

        assert_eq!(
            report,
            LoadReport {
                processed: 3,
                skipped: 2
            }
        );
        assert_eq!(stream.stream_len(), 3);
        assert_eq!(stream.global_count(), 1.0);
    }

    #[test]
    fn gzipped_edge_list_is_decompressed() {
        let dir = TempDir::new("eddy-loaders").unwrap();
        let path = dir.path().join("tiny.txt.gz");
        let mut enc = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        enc.write_all(EDGE_LIST.as_bytes()).unwrap();
        enc.finish().unwrap();

        let edges = EdgeListLoader::new(&path).edges().unwrap();
        assert_eq!(edges.len(), 3);
    }

    #[test]
    fn csv_records_map_through_the_caller_closure() {
        #[derive(Deserialize)]
        struct Rec {
            src: u64,
            dst: u64,
        }

        let dir = TempDir::new("eddy-loaders").unwrap();
        let path = dir.path().join("edges.csv");
        File::create(&path)
            .unwrap()
            .write_all(b"src,dst\n1,2\n2,3\n1,3\n7,7\n")
            .unwrap();

        let mut stream = TriangleStream::from_seed(10, Variant::Impr, 1).unwrap();
        let report = CsvEdgeLoader::new(&path)
            .set_header(true)
            .load_into(&mut stream, |rec: Rec| Some((rec.src, rec.dst)))
            .unwrap();

        assert_eq!(report.processed, 3);
        assert_eq!(report.skipped, 1);
        assert_eq!(stream.global_count(), 1.0);
    }
}
