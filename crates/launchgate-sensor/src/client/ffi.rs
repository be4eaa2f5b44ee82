//! Minimal Endpoint Security bindings (macOS only).
//!
//! Only the subset this agent touches is declared: the client lifecycle
//! calls, the exec-argument accessors, and the leading fields of the message
//! and process records needed to reach the subject executable path. Every
//! struct mirrors the field order of `EndpointSecurity/ESMessage.h`; fields
//! past the last one we read are omitted, which is sound because all access
//! goes through kernel-owned pointers and nothing here is ever constructed
//! or sized on our side.

#![allow(non_camel_case_types)]

use block2::Block;
use libc::{c_char, timespec};

/// `es_event_type_t`: authorize a pending process execution.
pub const ES_EVENT_TYPE_AUTH_EXEC: u32 = 0;

/// `es_return_t` success.
pub const ES_RETURN_SUCCESS: u32 = 0;

/// `es_respond_result_t` success.
pub const ES_RESPOND_RESULT_SUCCESS: u32 = 0;

/// Opaque `es_client_t`.
#[repr(C)]
pub struct es_client_t {
    _opaque: [u8; 0],
}

/// `es_string_token_t`: a length-counted byte buffer owned by the message.
/// `length` excludes the trailing NUL.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct es_string_token_t {
    pub length: usize,
    pub data: *const c_char,
}

impl es_string_token_t {
    /// View the token as a byte slice.
    ///
    /// # Safety
    /// The enclosing message must still be live; tokens borrow from it.
    pub unsafe fn as_bytes<'a>(&self) -> &'a [u8] {
        if self.data.is_null() || self.length == 0 {
            return &[];
        }
        std::slice::from_raw_parts(self.data as *const u8, self.length)
    }
}

/// Leading fields of `es_file_t`; only `path` is read.
#[repr(C)]
pub struct es_file_t {
    pub path: es_string_token_t,
    pub path_truncated: bool,
    // struct stat follows; never read here.
}

/// Leading fields of `es_process_t`, through `executable`.
#[repr(C)]
pub struct es_process_t {
    pub audit_token: [u32; 8],
    pub ppid: i32,
    pub original_ppid: i32,
    pub group_id: i32,
    pub session_id: i32,
    pub codesigning_flags: u32,
    pub is_platform_binary: bool,
    pub is_es_client: bool,
    pub cdhash: [u8; 20],
    pub signing_id: es_string_token_t,
    pub team_id: es_string_token_t,
    pub executable: *mut es_file_t,
    // tty, start_time, responsible/parent audit tokens follow; never read.
}

/// Opaque `es_event_exec_t`; argv is reached through the accessor functions.
#[repr(C)]
pub struct es_event_exec_t {
    _opaque: [u8; 0],
}

/// The `es_events_t` union. Opaque, but alignment must match so the field
/// offset inside [`es_message_t`] is laid out correctly.
#[repr(C, align(8))]
pub struct es_events_t {
    _opaque: [u8; 0],
}

/// Leading fields of `es_message_t`, through the event union.
#[repr(C)]
pub struct es_message_t {
    pub version: u32,
    pub time: timespec,
    pub mach_time: u64,
    pub deadline: u64,
    pub process: *mut es_process_t,
    pub seq_num: u64,
    pub action_type: u32,
    /// `action` union (`es_event_id_t` / `es_result_t`), 32 reserved bytes.
    pub action: [u8; 32],
    pub event_type: u32,
    pub event: es_events_t,
}

impl es_message_t {
    /// The exec payload of the event union. Valid only when `event_type`
    /// is [`ES_EVENT_TYPE_AUTH_EXEC`].
    pub fn exec_event(&self) -> *const es_event_exec_t {
        &self.event as *const es_events_t as *const es_event_exec_t
    }
}

/// The handler block signature `es_handler_block_t`.
pub type EsHandlerBlock = Block<dyn Fn(*mut es_client_t, *const es_message_t)>;

#[link(name = "EndpointSecurity", kind = "framework")]
extern "C" {
    pub fn es_new_client(client: *mut *mut es_client_t, handler: *const EsHandlerBlock) -> u32;

    pub fn es_subscribe(client: *mut es_client_t, events: *const u32, event_count: u32) -> u32;

    pub fn es_respond_auth_result(
        client: *mut es_client_t,
        message: *const es_message_t,
        result: u32,
        cache: bool,
    ) -> u32;

    pub fn es_delete_client(client: *mut es_client_t) -> u32;

    pub fn es_exec_arg_count(event: *const es_event_exec_t) -> u32;

    pub fn es_exec_arg(event: *const es_event_exec_t, index: u32) -> es_string_token_t;
}
