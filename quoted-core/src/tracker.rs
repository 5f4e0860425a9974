/// Detects occurrences of one or more signals in a stream of characters.
///
/// Characters are fed in one at a time with `push`. The tracker remembers
/// every partial match in progress, so a multi-character signal may be
/// split across any number of calls. Once a signal has been fully matched,
/// the tracker is *triggered* and forgets every other partial match. It
/// must then be `reset` before it is fed again.
///
/// This is a tiny multi-pattern matcher specialized for a handful of short
/// signals. Signals are validated to not overlap with signals of other
/// classes (see `SignalsBuilder`), so there is never more than one sensible
/// match at a position. When alternates of the same class both complete on
/// the same character (e.g., `\n` and `\r\n`), the longest one wins.
#[derive(Clone, Debug)]
pub struct SignalTracker {
    signals: Vec<Signal>,
    active: Vec<Partial>,
    triggered: Option<usize>,
}

#[derive(Clone, Debug)]
struct Signal {
    chars: Vec<char>,
    /// The length of this signal in bytes when encoded as UTF-8.
    len: usize,
}

/// A match in progress: `matched` characters of signal `signal` have been
/// seen so far.
#[derive(Clone, Copy, Debug)]
struct Partial {
    signal: usize,
    matched: usize,
}

impl SignalTracker {
    /// Create a tracker for the given signals.
    ///
    /// Empty signals can never match and are ignored.
    pub fn new<I, S>(signals: I) -> SignalTracker
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let signals = signals
            .into_iter()
            .filter(|s| !s.as_ref().is_empty())
            .map(|s| Signal {
                chars: s.as_ref().chars().collect(),
                len: s.as_ref().len(),
            })
            .collect();
        SignalTracker { signals, active: vec![], triggered: None }
    }

    /// Returns true if and only if this tracker has no signals, and can
    /// therefore never trigger.
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Feed the next character to this tracker.
    ///
    /// Returns true if and only if this character completed a signal.
    pub fn push(&mut self, c: char) -> bool {
        debug_assert!(
            self.triggered.is_none(),
            "tracker must be reset after it triggers"
        );
        let signals = &self.signals;
        let mut i = 0;
        while i < self.active.len() {
            let p = &mut self.active[i];
            if signals[p.signal].chars[p.matched] == c {
                p.matched += 1;
                i += 1;
            } else {
                self.active.swap_remove(i);
            }
        }
        for (i, sig) in signals.iter().enumerate() {
            if sig.chars[0] == c {
                self.active.push(Partial { signal: i, matched: 1 });
            }
        }

        let mut best: Option<usize> = None;
        for p in &self.active {
            if p.matched < signals[p.signal].chars.len() {
                continue;
            }
            best = match best {
                Some(b) if signals[b].len >= signals[p.signal].len => Some(b),
                _ => Some(p.signal),
            };
        }
        if best.is_some() {
            self.triggered = best;
            self.active.clear();
        }
        best.is_some()
    }

    /// If the last character fed to this tracker completed a signal, then
    /// return the length, in bytes, of the signal matched.
    pub fn triggered(&self) -> Option<usize> {
        self.triggered.map(|i| self.signals[i].len)
    }

    /// Forget all partial matches and any trigger.
    pub fn reset(&mut self) {
        self.active.clear();
        self.triggered = None;
    }
}
