use canopy_runtime::{InputSource, Key};

/// Keys held during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeySet {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl InputSource for KeySet {
    fn is_pressed(&self, key: Key) -> bool {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Jump => self.jump,
        }
    }
}

/// Tick-by-tick key script.
///
/// Comma separated steps, each `KEYS[*COUNT]` where `KEYS` is any mix of
/// `L`, `R`, `J`, or `.` for no keys: `"R*40,RJ,.*20,J"`. After the last step
/// nothing is pressed. With `repeat` the script wraps instead.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptedInput {
    steps: Vec<(KeySet, u32)>,
    len: u64,
    repeat: bool,
}

impl ScriptedInput {
    pub fn parse(script: &str) -> Result<Self, String> {
        let mut steps = Vec::new();
        for raw in script.split(',') {
            let tok = raw.trim();
            if tok.is_empty() {
                continue;
            }
            let (keys, count) = match tok.split_once('*') {
                Some((k, n)) => {
                    let n: u32 = n
                        .trim()
                        .parse()
                        .map_err(|_| format!("bad repeat count in {tok:?}"))?;
                    (k.trim(), n)
                }
                None => (tok, 1),
            };
            let mut set = KeySet::default();
            for c in keys.chars() {
                match c.to_ascii_uppercase() {
                    'L' => set.left = true,
                    'R' => set.right = true,
                    'J' => set.jump = true,
                    '.' => {}
                    other => return Err(format!("unknown key {other:?} in {tok:?}")),
                }
            }
            if keys.is_empty() {
                return Err(format!("missing keys in {tok:?}"));
            }
            if count > 0 {
                steps.push((set, count));
            }
        }
        let len = steps.iter().map(|(_, n)| *n as u64).sum();
        Ok(Self {
            steps,
            len,
            repeat: false,
        })
    }

    pub fn repeating(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    /// Number of ticks the script covers once.
    #[inline]
    pub fn len(&self) -> u64 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn keys_at(&self, tick: u64) -> KeySet {
        if self.len == 0 {
            return KeySet::default();
        }
        let mut t = if self.repeat { tick % self.len } else { tick };
        for (set, n) in &self.steps {
            let n = *n as u64;
            if t < n {
                return *set;
            }
            t -= n;
        }
        KeySet::default()
    }
}
