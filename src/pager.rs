use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::debug;

use crate::error::{Result, StorageError};
use crate::layout::Layout;

/// Owns the backing file and an in-memory copy of every page touched so far.
///
/// Pages are loaded on first access and stay cached until they are released
/// or the pager is dropped. There is no eviction: the whole table,
/// `max_pages * page_size` bytes at most, must fit in memory.
pub struct Pager {
    file: File,
    file_length: u64,
    layout: Layout,
    pages: Vec<Option<Box<[u8]>>>,
}

impl Pager {
    /// Opens `path` for reading and writing, creating it if it does not exist.
    pub fn open(path: &Path, layout: Layout) -> Result<Self> {
        let open_error = |source| StorageError::Open {
            path: path.to_path_buf(),
            source,
        };
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(open_error)?;
        let file_length = file.metadata().map_err(open_error)?.len();

        debug!("opened {} ({file_length} bytes)", path.display());

        Ok(Self {
            file,
            file_length,
            layout,
            pages: (0..layout.max_pages).map(|_| None).collect(),
        })
    }

    pub fn file_length(&self) -> u64 {
        self.file_length
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn is_loaded(&self, page_num: usize) -> bool {
        self.pages.get(page_num).is_some_and(Option::is_some)
    }

    /// Returns the buffer of page `page_num`, reading it from disk on first use.
    ///
    /// A page that lies past the end of the file starts zeroed. A page the
    /// file only partly covers is read as far as the file goes and the rest
    /// stays zeroed.
    pub fn get_page(&mut self, page_num: usize) -> Result<&mut [u8]> {
        if page_num >= self.layout.max_pages {
            return Err(StorageError::PageOutOfBounds {
                page: page_num,
                max: self.layout.max_pages,
            });
        }

        let page = match &mut self.pages[page_num] {
            Some(page) => page,
            slot @ None => slot.insert(read_page(
                &mut self.file,
                self.file_length,
                self.layout,
                page_num,
            )?),
        };
        Ok(&mut page[..])
    }

    /// Writes the first `size` bytes of page `page_num` to its place in the file.
    pub fn flush(&mut self, page_num: usize, size: usize) -> Result<()> {
        let page = self
            .pages
            .get(page_num)
            .and_then(Option::as_deref)
            .ok_or(StorageError::FlushUnloadedPage { page: page_num })?;
        debug_assert!(size <= page.len());

        let offset = self.layout.page_offset(page_num);
        let io_error = |source| StorageError::PageIo {
            page: page_num,
            source,
        };
        self.file.seek(SeekFrom::Start(offset)).map_err(io_error)?;
        self.file.write_all(&page[..size]).map_err(io_error)?;
        self.file_length = self.file_length.max(offset + size as u64);

        debug!("flushed {size} bytes of page {page_num}");
        Ok(())
    }

    /// Drops the cached copy of a page. Unflushed changes are lost.
    pub fn release(&mut self, page_num: usize) {
        if let Some(slot) = self.pages.get_mut(page_num) {
            if slot.take().is_some() {
                debug!("released page {page_num}");
            }
        }
    }

    /// Syncs the file to disk and closes it.
    pub fn close(self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }
}

fn read_page(
    file: &mut File,
    file_length: u64,
    layout: Layout,
    page_num: usize,
) -> Result<Box<[u8]>> {
    let mut page = Vec::with_capacity(layout.page_size);
    let offset = layout.page_offset(page_num);

    if offset < file_length {
        let io_error = |source| StorageError::PageIo {
            page: page_num,
            source,
        };
        file.seek(SeekFrom::Start(offset)).map_err(io_error)?;
        Read::by_ref(file)
            .take(layout.page_size as u64)
            .read_to_end(&mut page)
            .map_err(io_error)?;
        debug!("loaded page {page_num} ({} bytes from disk)", page.len());
    } else {
        debug!("allocated page {page_num}");
    }

    page.resize(layout.page_size, 0);
    Ok(page.into_boxed_slice())
}
