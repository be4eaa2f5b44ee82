//! Endpoint Security client session lifecycle.
//!
//! [`EsSession`] is the single owner of the privileged connection: created
//! once at startup with the decision engine installed as handler, subscribed
//! to exactly `AUTH_EXEC`, and destroyed once at shutdown. `close` consumes
//! the session, so use-after-close and double-close do not compile.

pub mod error;

#[cfg(target_os = "macos")]
pub(crate) mod ffi;

#[cfg(target_os = "macos")]
mod platform {
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::ptr;
    use std::sync::Arc;

    use anyhow::Result;
    use block2::RcBlock;
    use tracing::{debug, error, info};

    use launchgate_core::event::AuthEvent;
    use launchgate_core::policy::Authorizer;

    use super::error::ClientError;
    use super::ffi;

    /// The privileged Endpoint Security session.
    ///
    /// Holds the raw client handle and keeps the handler block alive for the
    /// client's whole lifetime. The handle is used read-only by concurrent
    /// handler invocations; teardown happens only through [`close`], at
    /// process shutdown, after the OS guarantees no further deliveries.
    ///
    /// [`close`]: EsSession::close
    pub struct EsSession {
        client: *mut ffi::es_client_t,
        _handler: RcBlock<dyn Fn(*mut ffi::es_client_t, *const ffi::es_message_t)>,
    }

    // The ES client handle may be created, used, and deleted from different
    // threads; the framework serializes its own internal state.
    unsafe impl Send for EsSession {}

    impl EsSession {
        /// Establish the session with `authorizer` installed as the handler
        /// and subscribe it to `AUTH_EXEC`.
        ///
        /// Any creation failure maps through [`ClientError::from_create_code`];
        /// a subscription failure deletes the half-built client first. Both
        /// are startup-fatal for the caller.
        pub fn open(authorizer: Arc<dyn Authorizer>) -> Result<Self> {
            let handler = RcBlock::new(
                move |client: *mut ffi::es_client_t, message: *const ffi::es_message_t| {
                    // A panic must not unwind into the framework's dispatch
                    // machinery; swallow it and let the platform's deadline
                    // fail-safe cover the unanswered event.
                    let outcome = catch_unwind(AssertUnwindSafe(|| unsafe {
                        handle_message(authorizer.as_ref(), client, message);
                    }));
                    if outcome.is_err() {
                        error!("panic in Endpoint Security handler suppressed");
                    }
                },
            );

            let mut client: *mut ffi::es_client_t = ptr::null_mut();
            let code = unsafe { ffi::es_new_client(&mut client, &*handler) };
            if let Some(err) = ClientError::from_create_code(code) {
                return Err(err.into());
            }

            let events = [ffi::ES_EVENT_TYPE_AUTH_EXEC];
            let ret = unsafe { ffi::es_subscribe(client, events.as_ptr(), events.len() as u32) };
            if ret != ffi::ES_RETURN_SUCCESS {
                unsafe { ffi::es_delete_client(client) };
                return Err(ClientError::SubscriptionFailed.into());
            }

            info!("Endpoint Security session established, subscribed to AUTH_EXEC");
            Ok(Self {
                client,
                _handler: handler,
            })
        }

        /// Tear the session down. Consuming `self` is the whole guard: the
        /// platform primitive is not idempotent, and ownership makes a second
        /// call unrepresentable.
        pub fn close(self) {
            debug!("closing Endpoint Security session");
            // Drop deletes the client.
        }
    }

    impl Drop for EsSession {
        fn drop(&mut self) {
            unsafe {
                ffi::es_delete_client(self.client);
            }
        }
    }

    /// Marshal one delivered message into the core event view, evaluate it,
    /// and send the reply the engine owes, if any.
    ///
    /// # Safety
    /// `message` and everything it points to must be live for the duration
    /// of this call, which the framework guarantees for the handler scope.
    unsafe fn handle_message(
        authorizer: &dyn Authorizer,
        client: *mut ffi::es_client_t,
        message: *const ffi::es_message_t,
    ) {
        let msg = &*message;
        let subject = &*msg.process;
        let subject_path = (*subject.executable).path.as_bytes();

        let response = if msg.event_type == ffi::ES_EVENT_TYPE_AUTH_EXEC {
            let exec = msg.exec_event();
            let count = ffi::es_exec_arg_count(exec);
            let mut args: Vec<&[u8]> = Vec::with_capacity(count as usize);
            for index in 0..count {
                args.push(ffi::es_exec_arg(exec, index).as_bytes());
            }
            authorizer.authorize(&AuthEvent::auth_exec(subject_path, &args))
        } else {
            // Unsubscribed kind routed to us anyway: the engine treats it as
            // a no-op and we must not reply.
            authorizer.authorize(&AuthEvent::other(subject_path))
        };

        if let Some(resp) = response {
            let ret =
                ffi::es_respond_auth_result(client, message, resp.result as u32, resp.cacheable);
            if ret != ffi::ES_RESPOND_RESULT_SUCCESS {
                error!(code = ret, "es_respond_auth_result failed");
            }
        }
    }
}

#[cfg(not(target_os = "macos"))]
mod platform {
    use std::sync::Arc;

    use anyhow::Result;

    use launchgate_core::policy::Authorizer;

    /// The privileged Endpoint Security session. Not available off macOS.
    #[derive(Debug)]
    pub struct EsSession {
        _priv: (),
    }

    impl EsSession {
        /// Always fails: Endpoint Security exists only on macOS.
        pub fn open(_authorizer: Arc<dyn Authorizer>) -> Result<Self> {
            anyhow::bail!(
                "Endpoint Security is only available on macOS; \
                 launchgate cannot establish its security hook on this platform"
            )
        }

        /// Tear the session down.
        pub fn close(self) {}
    }

}

pub use platform::EsSession;
