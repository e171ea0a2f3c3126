use std::collections::HashMap;

use uuid::Uuid;

use crate::models::StaffSchedule;

pub const UNASSIGNED_COLOR: &str = "#6c757d";
pub const TEACHER_ROLE_KEY: &str = "teacher";

/// Staff id to calendar color. Colors are random and only stable until the
/// next [`StaffColorMap::clear`].
#[derive(Debug, Default, Clone)]
pub struct StaffColorMap {
    colors: HashMap<i64, String>,
}

impl StaffColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.colors.clear();
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, staff_id: i64) -> Option<&str> {
        self.colors.get(&staff_id).map(String::as_str)
    }

    pub fn color_for(&mut self, staff_id: i64) -> &str {
        self.colors.entry(staff_id).or_insert_with(random_color)
    }

    /// Color of a class session block. A teacher's color wins over an
    /// assistant's; with nobody assigned the neutral color is used.
    pub fn session_color(&mut self, assignments: &[&StaffSchedule]) -> String {
        let mut chosen: Option<String> = None;

        for assignment in assignments {
            if assignment.staff.is_none() {
                continue;
            }
            let color = self.color_for(assignment.staff_id).to_string();
            let is_teacher = assignment.role_key.as_deref() == Some(TEACHER_ROLE_KEY);
            if is_teacher || chosen.is_none() {
                chosen = Some(color);
            }
        }

        chosen.unwrap_or_else(|| UNASSIGNED_COLOR.to_string())
    }
}

/// `#RRGGBB` from the random bytes of a v4 UUID.
pub fn random_color() -> String {
    let bytes = Uuid::new_v4().into_bytes();
    format!("#{:02X}{:02X}{:02X}", bytes[0], bytes[1], bytes[2])
}
