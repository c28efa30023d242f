use std::sync::Mutex;

use chrono::Utc;
use rand::Rng;

/// Key alphabet in ASCII order, so keys sort the same as strings.
const PUSH_CHARS: &[u8; 64] = b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";
const TIMESTAMP_CHARS: usize = 8;
const RANDOM_CHARS: usize = 12;

struct PushState {
    last_millis: i64,
    last_random: [u8; RANDOM_CHARS],
}

/// Generates 20-character keys that sort by creation time.
///
/// The first 8 characters encode the millisecond timestamp, the remaining 12
/// are random. Keys generated within the same millisecond reuse the previous
/// random suffix incremented by one, so they still sort in generation order.
pub struct PushIdGenerator {
    state: Mutex<PushState>,
}

impl Default for PushIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PushIdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PushState {
                last_millis: -1,
                last_random: [0; RANDOM_CHARS],
            }),
        }
    }

    pub fn generate(&self) -> String {
        self.generate_at(Utc::now().timestamp_millis())
    }

    fn generate_at(&self, millis: i64) -> String {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        if millis == state.last_millis {
            increment(&mut state.last_random);
        } else {
            let mut rng = rand::thread_rng();
            for slot in state.last_random.iter_mut() {
                *slot = rng.gen_range(0..64);
            }
        }
        state.last_millis = millis;

        let mut id = Vec::with_capacity(TIMESTAMP_CHARS + RANDOM_CHARS);
        let mut remaining = millis.max(0);
        let mut stamp = [0u8; TIMESTAMP_CHARS];
        for slot in stamp.iter_mut().rev() {
            *slot = PUSH_CHARS[(remaining % 64) as usize];
            remaining /= 64;
        }
        id.extend_from_slice(&stamp);
        id.extend(state.last_random.iter().map(|&i| PUSH_CHARS[i as usize]));

        id.into_iter().map(char::from).collect()
    }
}

fn increment(random: &mut [u8; RANDOM_CHARS]) {
    for slot in random.iter_mut().rev() {
        if *slot == 63 {
            *slot = 0;
        } else {
            *slot += 1;
            return;
        }
    }
}
