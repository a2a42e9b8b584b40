//! Identifier occurrence records.

use bitflags::bitflags;
use sable_ast::NodeId;
use std::fmt;

use crate::{ScopeId, VariableId};

/// Index into the reference arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ReferenceId(u32);

impl ReferenceId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ReferenceId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReferenceId({})", self.0)
    }
}

bitflags! {
    /// How an occurrence accesses its binding.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Access: u8 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
    }
}

/// One identifier occurrence in a non-declaring position.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub(crate) identifier: NodeId,
    pub(crate) from: ScopeId,
    pub(crate) resolved: Option<VariableId>,
    pub(crate) access: Access,
    pub(crate) init: bool,
    pub(crate) tainted: bool,
}

impl Reference {
    pub(crate) fn new(identifier: NodeId, from: ScopeId, access: Access, init: bool) -> Self {
        Reference {
            identifier,
            from,
            resolved: None,
            access,
            init,
            tainted: false,
        }
    }

    /// The identifier node this occurrence is.
    #[inline]
    pub fn identifier(&self) -> NodeId {
        self.identifier
    }

    /// The scope that was open when the occurrence was encountered.
    #[inline]
    pub fn from(&self) -> ScopeId {
        self.from
    }

    /// The variable this occurrence refers to, where statically known.
    #[inline]
    pub fn resolved(&self) -> Option<VariableId> {
        self.resolved
    }

    /// Whether the occurrence reads its binding.
    #[inline]
    pub fn is_read(&self) -> bool {
        self.access.contains(Access::READ)
    }

    /// Whether the occurrence writes its binding.
    #[inline]
    pub fn is_write(&self) -> bool {
        self.access.contains(Access::WRITE)
    }

    /// Whether the occurrence both reads and writes (e.g. `x += 1`).
    #[inline]
    pub fn is_read_write(&self) -> bool {
        self.access.contains(Access::READ | Access::WRITE)
    }

    /// Whether the occurrence only reads.
    #[inline]
    pub fn is_read_only(&self) -> bool {
        self.access == Access::READ
    }

    /// Whether the occurrence only writes.
    #[inline]
    pub fn is_write_only(&self) -> bool {
        self.access == Access::WRITE
    }

    /// Whether this occurrence is the identifier being initialized by its
    /// own declaration (`var x = ...`).
    #[inline]
    pub fn is_init(&self) -> bool {
        self.init
    }

    /// Whether the occurrence lies in a scope affected by a dynamic-scope
    /// construct, making static resolution potentially unsound at runtime.
    #[inline]
    pub fn is_tainted(&self) -> bool {
        self.tainted
    }
}
