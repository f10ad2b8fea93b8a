//! Signal forwarding from the supervisor to the child.
//!
//! Once the child is running, the supervisor should be transparent to
//! job-control and interrupt signals: whatever the terminal or shell sends
//! to the supervisor, the child receives the equivalent effect. The one
//! exception is SIGTSTP, which stops the supervisor itself instead of being
//! forwarded, so the shell suspends the whole pipeline coherently and the
//! child stops along with its controlling process.

use std::os::raw::c_int;
use std::thread;

use nix::sys::signal::{kill, raise, Signal};
use nix::unistd::Pid;
use signal_hook::consts::signal::{
    SIGABRT, SIGALRM, SIGBUS, SIGCONT, SIGHUP, SIGINT, SIGIO, SIGPIPE, SIGPROF, SIGQUIT, SIGSYS,
    SIGTERM, SIGTRAP, SIGTSTP, SIGTTIN, SIGTTOU, SIGURG, SIGUSR1, SIGUSR2, SIGVTALRM, SIGWINCH,
    SIGXCPU, SIGXFSZ,
};
use signal_hook::iterator::{Handle, Signals};

use crate::error::{PtimeError, Result};

/// The signals the relay subscribes to: every signal a handler can be
/// registered for, except SIGCHLD.
///
/// SIGKILL and SIGSTOP cannot be caught, ILL/FPE/SEGV cannot be usefully
/// handled from a signal iterator, and SIGCHLD is the supervisor's own
/// child-exit notification, so none of them appear here.
const RELAYED: &[c_int] = &[
    SIGHUP, SIGINT, SIGQUIT, SIGTRAP, SIGABRT, SIGBUS, SIGPIPE, SIGALRM, SIGTERM, SIGCONT,
    SIGTSTP, SIGTTIN, SIGTTOU, SIGURG, SIGXCPU, SIGXFSZ, SIGVTALRM, SIGPROF, SIGWINCH, SIGIO,
    SIGSYS, SIGUSR1, SIGUSR2,
];

/// What the relay does with one received signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relay {
    /// Stop the supervisor's own process with SIGSTOP.
    StopSelf,
    /// Send the signal to the child as-is.
    Forward(Signal),
}

fn classify(signum: c_int) -> Option<Relay> {
    if signum == SIGTSTP {
        return Some(Relay::StopSelf);
    }
    Signal::try_from(signum).ok().map(Relay::Forward)
}

/// Forwards incoming signals to the child for the rest of the process's life.
///
/// `SignalRelay` owns a single long-lived subscription serviced by a
/// background thread. The subscription is created right after the child is
/// spawned and is never torn down explicitly: the relay has no termination
/// condition of its own and is reclaimed when the supervisor exits. Delivery
/// is best-effort, matching what the OS itself guarantees; send errors
/// (e.g. the child already reaped) are ignored.
pub struct SignalRelay {
    handle: Handle,
}

impl SignalRelay {
    /// Subscribes to the relayed signal set and starts the forwarding thread
    /// targeting the child with the given PID.
    ///
    /// # Errors
    ///
    /// Returns an error if the signal subscription cannot be registered.
    pub fn start(child_pid: u32) -> Result<Self> {
        let mut signals =
            Signals::new(RELAYED).map_err(|e| PtimeError::SignalHandler(e.to_string()))?;
        let handle = signals.handle();
        let child = Pid::from_raw(child_pid as i32);

        thread::spawn(move || {
            for signum in signals.forever() {
                match classify(signum) {
                    Some(Relay::StopSelf) => {
                        let _ = raise(Signal::SIGSTOP);
                    }
                    Some(Relay::Forward(sig)) => {
                        let _ = kill(child, sig);
                    }
                    None => {}
                }
            }
        });

        Ok(Self { handle })
    }

    /// Whether the underlying subscription is still live.
    pub fn is_active(&self) -> bool {
        !self.handle.is_closed()
    }
}
