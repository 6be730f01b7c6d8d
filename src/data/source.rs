//! Reader/writer pairs over a backing store

/// Read side of a data source
pub trait DataSourceReader {
    /// Identifier of the underlying store; empty when not applicable
    fn id(&self) -> &str;
}

/// Write side of a data source
pub trait DataSourceWriter {
    fn id(&self) -> &str;
}

/// Pairs a reader and a writer for the same store
#[derive(Debug, Clone, Default)]
pub struct DataSource<R, W> {
    reader: R,
    writer: W,
}

impl<R: DataSourceReader, W: DataSourceWriter> DataSource<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

/// Reader for sources that are never read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullDataSourceReader;

impl DataSourceReader for NullDataSourceReader {
    fn id(&self) -> &str {
        ""
    }
}

/// Writer for read-only sources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullDataSourceWriter;

impl DataSourceWriter for NullDataSourceWriter {
    fn id(&self) -> &str {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: i32,
        name: String,
    }

    #[derive(Default)]
    struct ItemReader {
        last_id: i32,
    }

    impl ItemReader {
        fn item(&mut self, id: i32) -> Item {
            self.last_id = id;
            Item {
                id,
                name: "Bob".to_string(),
            }
        }
    }

    impl DataSourceReader for ItemReader {
        fn id(&self) -> &str {
            "items"
        }
    }

    #[derive(Default)]
    struct ItemWriter {
        stored: Vec<Item>,
    }

    impl ItemWriter {
        fn store(&mut self, mut item: Item) -> i32 {
            item.id = 1234;
            self.stored.push(item);
            1234
        }
    }

    impl DataSourceWriter for ItemWriter {
        fn id(&self) -> &str {
            "items"
        }
    }

    #[test]
    fn test_reader_side() {
        let mut source = DataSource::new(ItemReader::default(), ItemWriter::default());
        let item = source.reader_mut().item(42);
        assert_eq!(item.id, 42);
        assert_eq!(source.reader().last_id, 42);
        assert_eq!(source.reader().id(), "items");
    }

    #[test]
    fn test_writer_side() {
        let mut source = DataSource::new(ItemReader::default(), ItemWriter::default());
        let id = source.writer_mut().store(Item {
            id: 0,
            name: "new".to_string(),
        });
        assert_eq!(id, 1234);
        let (_, writer) = source.into_parts();
        assert_eq!(writer.stored.len(), 1);
    }

    #[test]
    fn test_null_sides_have_empty_ids() {
        let source = DataSource::new(NullDataSourceReader, NullDataSourceWriter);
        assert_eq!(source.reader().id(), "");
        assert_eq!(source.writer().id(), "");
    }
}
