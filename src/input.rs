//! Streaming reader that cuts an input stream into sentence blocks.

use std::io::{self, BufRead};

/// Raw text of one blank-line separated block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// 1-based line number of the block's first line in the stream.
    pub line: usize,
    /// The block's lines joined with `\n`, without a trailing newline.
    pub text: String,
}

/// Iterator over the blocks of a `BufRead`.
///
/// Blocks are yielded as soon as their terminating blank line (or the end of
/// the stream) is read, so sentences can be rendered one at a time.
pub struct BlockReader<R> {
    reader: R,
    line_no: usize,
    done: bool,
}

impl<R: BufRead> BlockReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            done: false,
        }
    }

    fn next_block(&mut self) -> io::Result<Option<Block>> {
        let mut lines: Vec<String> = Vec::new();
        let mut start = 0;
        let mut buf = String::new();

        loop {
            buf.clear();
            if self.reader.read_line(&mut buf)? == 0 {
                self.done = true;
                break;
            }
            self.line_no += 1;

            let line = buf.trim_end_matches(['\n', '\r']);
            if line.trim().is_empty() {
                if lines.is_empty() {
                    // runs of blank lines between blocks
                    continue;
                }
                break;
            }
            if lines.is_empty() {
                start = self.line_no;
            }
            lines.push(line.to_string());
        }

        if lines.is_empty() {
            return Ok(None);
        }
        Ok(Some(Block {
            line: start,
            text: lines.join("\n"),
        }))
    }
}

impl<R: BufRead> Iterator for BlockReader<R> {
    type Item = io::Result<Block>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.next_block().transpose()
    }
}
