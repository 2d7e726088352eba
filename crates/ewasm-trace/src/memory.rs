use std::{collections::BTreeMap, fmt};

use primitive_types::U256;

/// Largest number of bytes a single memory access may cover.
///
/// Accesses above this size are refused rather than simulated. The value is part of the
/// trace format: changing it changes which accesses fall back to placeholder results.
pub const MEMORY_ACCESS_CEILING: u64 = 0xffff;

/// Memory page size in bytes.
const PAGE_SIZE: usize = 1 << 12;

/// Length of the rows produced by [`Memory::nonzero_rows()`].
pub(crate) const ROW_SIZE: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
struct MemoryPage(Box<[u8; PAGE_SIZE]>);

impl Default for MemoryPage {
    fn default() -> Self {
        Self(Box::new([0; PAGE_SIZE]))
    }
}

impl MemoryPage {
    fn is_zeroed(&self) -> bool {
        self.0.iter().all(|&byte| byte == 0)
    }
}

/// Byte-addressed memory of a single interpretation run.
///
/// Memory is conceptually infinite and zero-initialized. Physical addresses are 64-bit and
/// wrap around; only pages that were written to are allocated, so a write at a huge offset
/// costs a single page.
///
/// Besides the contents, memory tracks the *memory size*: the highest `offset + size` ever
/// passed to a successful [`access()`](Self::access) check. Raw reads and writes neither
/// check nor update it.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    pages: BTreeMap<u64, MemoryPage>,
    size: U256,
    pagepool: PagePool,
}

// Pages are never removed on their own, so a page that was only ever written with zeroes
// compares equal to a missing one.
impl PartialEq for Memory {
    fn eq(&self, other: &Self) -> bool {
        if self.size != other.size {
            return false;
        }
        let only_in = |this: &Self, other: &Self| {
            this.pages
                .iter()
                .filter(|(idx, _)| !other.pages.contains_key(idx))
                .all(|(_, page)| page.is_zeroed())
        };
        self.pages
            .iter()
            .filter_map(|(idx, page)| Some((page, other.pages.get(idx)?)))
            .all(|(this_page, other_page)| this_page == other_page)
            && only_in(self, other)
            && only_in(other, self)
    }
}

impl Memory {
    /// Current value of the memory size register.
    pub fn size(&self) -> U256 {
        self.size
    }

    /// Checks whether `size` bytes may be accessed at `offset` and grows the memory size
    /// accordingly.
    ///
    /// Returns `false` if `size` exceeds [`MEMORY_ACCESS_CEILING`]; in this case the memory
    /// size is left unchanged and the caller must substitute a placeholder for the access.
    /// `offset + size` saturates at `U256::MAX`.
    pub fn access(&mut self, offset: U256, size: U256) -> bool {
        if size > U256::from(MEMORY_ACCESS_CEILING) {
            return false;
        }
        self.size = self.size.max(offset.saturating_add(size));
        true
    }

    /// Reads `len` bytes starting at `offset`. Unwritten bytes read as zero.
    pub fn read(&self, offset: u64, len: usize) -> Vec<u8> {
        let (mut page_idx, mut offset_in_page) = address_to_page_offset(offset);
        let mut result = Vec::with_capacity(len);
        while result.len() < len {
            let len_in_page = (len - result.len()).min(PAGE_SIZE - offset_in_page);
            if let Some(page) = self.pages.get(&page_idx) {
                result.extend_from_slice(&page.0[offset_in_page..offset_in_page + len_in_page]);
            } else {
                result.resize(result.len() + len_in_page, 0);
            }
            page_idx = next_page(page_idx);
            offset_in_page = 0;
        }
        result
    }

    /// Reads a single byte.
    pub fn read_byte(&self, address: u64) -> u8 {
        let (page_idx, offset_in_page) = address_to_page_offset(address);
        self.pages
            .get(&page_idx)
            .map_or(0, |page| page.0[offset_in_page])
    }

    /// Writes `bytes` starting at `offset`, allocating pages as needed.
    pub fn write(&mut self, offset: u64, bytes: &[u8]) {
        let (mut page_idx, mut offset_in_page) = address_to_page_offset(offset);
        let mut remaining = bytes;
        while !remaining.is_empty() {
            let len_in_page = remaining.len().min(PAGE_SIZE - offset_in_page);
            let (chunk, rest) = remaining.split_at(len_in_page);
            let page = self.get_or_insert_page(page_idx);
            page.0[offset_in_page..offset_in_page + len_in_page].copy_from_slice(chunk);
            remaining = rest;
            page_idx = next_page(page_idx);
            offset_in_page = 0;
        }
    }

    /// Writes a single byte.
    pub fn write_byte(&mut self, address: u64, value: u8) {
        let (page_idx, offset_in_page) = address_to_page_offset(address);
        self.get_or_insert_page(page_idx).0[offset_in_page] = value;
    }

    /// Zeroes the memory and resets the memory size.
    pub fn clear(&mut self) {
        for page in std::mem::take(&mut self.pages).into_values() {
            self.pagepool.recycle_page(page);
        }
        self.size = U256::zero();
    }

    /// Iterates over 32-byte aligned rows that contain at least one non-zero byte, in
    /// address order.
    pub(crate) fn nonzero_rows(&self) -> impl Iterator<Item = (u64, &[u8])> + '_ {
        self.pages.iter().flat_map(|(&page_idx, page)| {
            page.0
                .chunks(ROW_SIZE)
                .enumerate()
                .filter(|(_, row)| row.iter().any(|&byte| byte != 0))
                .map(move |(i, row)| ((page_idx << 12) + (i * ROW_SIZE) as u64, row))
        })
    }

    fn get_or_insert_page(&mut self, idx: u64) -> &mut MemoryPage {
        let pagepool = &mut self.pagepool;
        self.pages
            .entry(idx)
            .or_insert_with(|| pagepool.allocate_page())
    }
}

#[inline(always)]
fn address_to_page_offset(address: u64) -> (u64, usize) {
    (address >> 12, (address as usize) & (PAGE_SIZE - 1))
}

/// Index of the page following `idx`; the last page is followed by the first one.
#[inline(always)]
fn next_page(idx: u64) -> u64 {
    (idx + 1) & (u64::MAX >> 12)
}

#[derive(Default, Clone)]
struct PagePool(Vec<MemoryPage>);

impl fmt::Debug for PagePool {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PagePool")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

impl PagePool {
    fn allocate_page(&mut self) -> MemoryPage {
        self.0
            .pop()
            .map(|mut page| {
                page.0.fill(0);
                page
            })
            .unwrap_or_default()
    }

    fn recycle_page(&mut self, page: MemoryPage) {
        self.0.push(page);
    }
}
