use std::fmt;

/// Number of bits the category flags are shifted left of the action code.
pub const CATEGORY_SHIFT: u32 = 16;

/// Bit marking an action code as cgroup-tagged. Lives in the low half of
/// the action word alongside the code itself and must be masked off before
/// the code is interpreted.
pub const CGROUP_TAG: u16 = 1 << 8;

/// Category flags bitfield — the high 16 bits of the action word.
///
/// Each bit classifies the event; several may be set at once (a queued
/// synchronous write carries WRITE | SYNC | QUEUE).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Categories(u16);

impl Categories {
    pub const NONE: Self = Self(0);
    pub const READ: Self = Self(1 << 0);
    pub const WRITE: Self = Self(1 << 1);
    pub const FLUSH: Self = Self(1 << 2);
    pub const SYNC: Self = Self(1 << 3);
    pub const QUEUE: Self = Self(1 << 4);
    pub const REQUEUE: Self = Self(1 << 5);
    pub const ISSUE: Self = Self(1 << 6);
    pub const COMPLETE: Self = Self(1 << 7);
    pub const FS: Self = Self(1 << 8);
    pub const PC: Self = Self(1 << 9);
    pub const NOTIFY: Self = Self(1 << 10);
    pub const AHEAD: Self = Self(1 << 11);
    pub const META: Self = Self(1 << 12);
    pub const DISCARD: Self = Self(1 << 13);
    pub const DRV_DATA: Self = Self(1 << 14);
    pub const FUA: Self = Self(1 << 15);

    pub fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u16 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

const CATEGORY_NAMES: [(Categories, &str); 16] = [
    (Categories::READ, "read"),
    (Categories::WRITE, "write"),
    (Categories::FLUSH, "flush"),
    (Categories::SYNC, "sync"),
    (Categories::QUEUE, "queue"),
    (Categories::REQUEUE, "requeue"),
    (Categories::ISSUE, "issue"),
    (Categories::COMPLETE, "complete"),
    (Categories::FS, "fs"),
    (Categories::PC, "pc"),
    (Categories::NOTIFY, "notify"),
    (Categories::AHEAD, "ahead"),
    (Categories::META, "meta"),
    (Categories::DISCARD, "discard"),
    (Categories::DRV_DATA, "drv-data"),
    (Categories::FUA, "fua"),
];

impl fmt::Display for Categories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        let mut first = true;
        for (flag, name) in CATEGORY_NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// The specific event kind, carried in the low 16 bits of the action word
/// (cgroup tag bit excluded).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum ActionCode {
    /// Request queued.
    Queue = 1,
    /// Back merged into an existing request.
    BackMerge = 2,
    /// Front merged into an existing request.
    FrontMerge = 3,
    /// Allocated a new request.
    GetRq = 4,
    /// Sleeping on request allocation.
    SleepRq = 5,
    /// Request requeued.
    Requeue = 6,
    /// Sent to the driver.
    Issue = 7,
    /// Completed by the driver.
    Complete = 8,
    /// Queue was plugged.
    Plug = 9,
    /// Queue unplugged by I/O.
    UnplugIo = 10,
    /// Queue unplugged by timer.
    UnplugTimer = 11,
    /// Request inserted.
    Insert = 12,
    /// Bio was split.
    Split = 13,
    /// Bio was bounced.
    Bounce = 14,
    /// Bio was remapped.
    Remap = 15,
    /// Request aborted.
    Abort = 16,
    /// Binary driver data.
    DriverData = 17,
}

impl ActionCode {
    /// Map a wire value (cgroup tag already masked off) to a known code.
    /// Unknown values yield `None` rather than an error — newer kernels may
    /// emit codes this decoder doesn't know about.
    pub fn from_wire(value: u16) -> Option<Self> {
        Some(match value {
            1 => Self::Queue,
            2 => Self::BackMerge,
            3 => Self::FrontMerge,
            4 => Self::GetRq,
            5 => Self::SleepRq,
            6 => Self::Requeue,
            7 => Self::Issue,
            8 => Self::Complete,
            9 => Self::Plug,
            10 => Self::UnplugIo,
            11 => Self::UnplugTimer,
            12 => Self::Insert,
            13 => Self::Split,
            14 => Self::Bounce,
            15 => Self::Remap,
            16 => Self::Abort,
            17 => Self::DriverData,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Queue => "queue",
            Self::BackMerge => "back-merge",
            Self::FrontMerge => "front-merge",
            Self::GetRq => "get-rq",
            Self::SleepRq => "sleep-rq",
            Self::Requeue => "requeue",
            Self::Issue => "issue",
            Self::Complete => "complete",
            Self::Plug => "plug",
            Self::UnplugIo => "unplug-io",
            Self::UnplugTimer => "unplug-timer",
            Self::Insert => "insert",
            Self::Split => "split",
            Self::Bounce => "bounce",
            Self::Remap => "remap",
            Self::Abort => "abort",
            Self::DriverData => "drv-data",
        }
    }
}

impl fmt::Display for ActionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Notification message kind, used in place of an action code when the
/// NOTIFY category bit is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notify {
    /// Process name registration.
    Process,
    /// Timestamp synchronisation message.
    Timestamp,
    /// Free-form text message in the payload.
    Message,
}

impl Notify {
    fn from_wire(value: u16) -> Option<Self> {
        Some(match value {
            0 => Self::Process,
            1 => Self::Timestamp,
            2 => Self::Message,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Process => "process",
            Self::Timestamp => "timestamp",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for Notify {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The 32-bit action word: category flags in the high half, action code
/// (plus the cgroup tag bit) in the low half.
///
/// ```text
/// ┌──────────────────────┬───────────┬─────────────────────┐
/// │ bits 16..32          │ bit 8     │ bits 0..8           │
/// │ category flags       │ cgroup tag│ action code         │
/// └──────────────────────┴───────────┴─────────────────────┘
/// ```
///
/// The decomposed views are pure bit math over the raw word — nothing here
/// is a separate wire field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Action(u32);

impl Action {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    /// Compose an action word from a category set and a code.
    pub fn new(categories: Categories, code: ActionCode) -> Self {
        Self((u32::from(categories.raw()) << CATEGORY_SHIFT) | u32::from(code as u16))
    }

    /// Compose a notification action word. The NOTIFY category bit is
    /// always set.
    pub fn new_notify(notify: Notify) -> Self {
        let categories = Categories::NOTIFY;
        let code = match notify {
            Notify::Process => 0,
            Notify::Timestamp => 1,
            Notify::Message => 2,
        };
        Self((u32::from(categories.raw()) << CATEGORY_SHIFT) | code)
    }

    /// Mark the action as cgroup-tagged.
    pub fn with_cgroup_tag(self) -> Self {
        Self(self.0 | u32::from(CGROUP_TAG))
    }

    /// The category flags from the high 16 bits.
    pub fn categories(self) -> Categories {
        Categories::from_raw((self.0 >> CATEGORY_SHIFT) as u16)
    }

    /// The action code from the low 16 bits, cgroup tag masked off.
    ///
    /// Returns `None` for unknown codes and for notification events
    /// (use [`notify`](Self::notify) when the NOTIFY category is set).
    pub fn code(self) -> Option<ActionCode> {
        if self.categories().contains(Categories::NOTIFY) {
            return None;
        }
        ActionCode::from_wire(self.low_bits())
    }

    /// The notification kind, when the NOTIFY category bit is set.
    pub fn notify(self) -> Option<Notify> {
        if !self.categories().contains(Categories::NOTIFY) {
            return None;
        }
        Notify::from_wire(self.low_bits())
    }

    /// Whether the cgroup tag bit is set on the code half.
    pub fn is_cgroup_tagged(self) -> bool {
        self.0 as u16 & CGROUP_TAG != 0
    }

    fn low_bits(self) -> u16 {
        self.0 as u16 & !CGROUP_TAG
    }
}
