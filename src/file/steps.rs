use core::fmt;

/// Number of steps in every track: one bar of sixteenth notes in 4/4.
pub const STEPS_PER_TRACK: usize = 16;

const STEPS_PER_BEAT: usize = 4;

#[doc = r#"
The sixteen on/off slots of a [`Track`](crate::prelude::Track)

Renders as four beats of four steps, `x` for on and `-` for off:

```rust
# use splice::prelude::*;
let mut flags = [false; STEPS_PER_TRACK];
flags[0] = true;
flags[6] = true;

let steps = Steps::new(flags);
assert_eq!(steps.to_string(), "|x---|--x-|----|----|");
assert_eq!(steps.active_count(), 2);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "bevy", derive(bevy::reflect::Reflect))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Steps([bool; STEPS_PER_TRACK]);

impl Steps {
    /// Create steps from their flags
    pub const fn new(flags: [bool; STEPS_PER_TRACK]) -> Self {
        Self(flags)
    }

    /// Any non-zero byte turns a step on.
    pub fn from_bytes(bytes: [u8; STEPS_PER_TRACK]) -> Self {
        Self(bytes.map(|b| b != 0))
    }

    /// Returns the step at `index`, or `None` past the last step
    pub fn get(&self, index: usize) -> Option<bool> {
        self.0.get(index).copied()
    }

    /// True if the step at `index` exists and is on
    pub fn is_on(&self, index: usize) -> bool {
        self.get(index).unwrap_or(false)
    }

    /// Number of steps that are on
    pub fn active_count(&self) -> usize {
        self.0.iter().filter(|&&on| on).count()
    }

    /// Iterate over the steps in order
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    /// Returns the raw flags
    pub const fn as_array(&self) -> &[bool; STEPS_PER_TRACK] {
        &self.0
    }
}

impl From<[bool; STEPS_PER_TRACK]> for Steps {
    fn from(value: [bool; STEPS_PER_TRACK]) -> Self {
        Self(value)
    }
}

impl fmt::Display for Steps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("|")?;
        for beat in self.0.chunks(STEPS_PER_BEAT) {
            for &on in beat {
                f.write_str(if on { "x" } else { "-" })?;
            }
            f.write_str("|")?;
        }
        Ok(())
    }
}

#[test]
fn nonzero_bytes_are_on() {
    use pretty_assertions::assert_eq;
    let mut bytes = [0u8; STEPS_PER_TRACK];
    bytes[3] = 1;
    bytes[4] = 0xFF;
    bytes[15] = 0x80;
    let steps = Steps::from_bytes(bytes);
    assert_eq!(steps.to_string(), "|---x|x---|----|---x|");
    assert_eq!(steps.active_count(), 3);
    assert!(steps.is_on(4));
    assert!(!steps.is_on(5));
    assert!(!steps.is_on(STEPS_PER_TRACK));
}
