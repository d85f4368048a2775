//! Dashboard overview and class remark history.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::models::{
    Class, ClassRemarkCount, ClassRemarksHistory, ClassStats, DashboardOverview, DashboardView,
    RecentRemark, Role, StudentView, TeacherRemarkGroup, round_to,
};

/// Recent remarks shown on the admin overview.
pub const ADMIN_RECENT_REMARKS: usize = 8;
/// Recent remarks shown on the teacher overview.
pub const TEACHER_RECENT_REMARKS: usize = 3;

/// Author label for remarks whose author has no profile.
pub const UNKNOWN_TEACHER: &str = "Unknown Teacher";

/// Optional `(number, section)` restriction for recent remarks.
#[derive(Debug, Clone, Default)]
pub struct ClassFilter {
    pub number: Option<i32>,
    pub section: Option<String>,
}

impl ClassFilter {
    fn matches(&self, student: &StudentView) -> bool {
        self.number.is_none_or(|n| student.class.number == n)
            && self
                .section
                .as_deref()
                .is_none_or(|s| student.class.section == s)
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Every remark of `students`, annotated with its student, newest first.
pub fn flatten_remarks<'a>(students: impl Iterator<Item = &'a StudentView>) -> Vec<RecentRemark> {
    let mut remarks: Vec<RecentRemark> = students
        .flat_map(|s| {
            s.remarks.iter().map(move |r| RecentRemark {
                remark: r.clone(),
                student_name: s.name.clone(),
                student_roll_number: s.roll_number.clone(),
                class: s.class.clone(),
            })
        })
        .collect();
    remarks.sort_by(|a, b| {
        b.remark
            .created_at
            .cmp(&a.remark.created_at)
            .then_with(|| b.remark.id.cmp(&a.remark.id))
    });
    remarks
}

/// Per-class statistics for classes that have students, best average first.
///
/// Ties keep class order.
pub fn class_stats(classes: &[Class], students: &[StudentView]) -> Vec<ClassStats> {
    let mut stats: Vec<ClassStats> = classes
        .iter()
        .filter_map(|class| {
            let members: Vec<&StudentView> =
                students.iter().filter(|s| s.class_id == class.id).collect();
            if members.is_empty() {
                return None;
            }
            Some(ClassStats {
                id: class.id,
                number: class.number,
                section: class.section.clone(),
                student_count: members.len(),
                total_remarks: members.iter().map(|s| s.remarks.len()).sum(),
                average_rating: round_to(mean(members.iter().map(|s| s.average_rating)), 1),
            })
        })
        .collect();
    stats.sort_by(|a, b| {
        b.average_rating
            .partial_cmp(&a.average_rating)
            .unwrap_or(Ordering::Equal)
    });
    stats
}

/// Remark counts per class number, ascending.
pub fn remarks_by_class_number(classes: &[Class], students: &[StudentView]) -> Vec<ClassRemarkCount> {
    let mut counts: BTreeMap<i32, usize> = classes.iter().map(|c| (c.number, 0)).collect();
    for student in students {
        *counts.entry(student.class.number).or_default() += student.remarks.len();
    }
    counts
        .into_iter()
        .map(|(class_number, count)| ClassRemarkCount {
            class_number,
            count,
        })
        .collect()
}

/// Build the role-specific dashboard overview.
pub fn build_overview(
    role: Role,
    classes: &[Class],
    students: &[StudentView],
    filter: &ClassFilter,
) -> DashboardOverview {
    let (view, recent_limit) = if role.sees_all_classes() {
        (DashboardView::Admin, ADMIN_RECENT_REMARKS)
    } else {
        (DashboardView::Teacher, TEACHER_RECENT_REMARKS)
    };

    let mut recent_remarks = flatten_remarks(students.iter().filter(|s| filter.matches(s)));
    recent_remarks.truncate(recent_limit);

    DashboardOverview {
        view,
        role_display_name: role.display_name(),
        total_students: students.len(),
        total_classes: classes.len(),
        total_remarks: students.iter().map(|s| s.remarks.len()).sum(),
        average_rating: round_to(mean(students.iter().map(|s| s.average_rating)), 1),
        class_stats: class_stats(classes, students),
        remarks_by_class: remarks_by_class_number(classes, students),
        recent_remarks,
    }
}

/// All remarks of one class, newest first, plus the same remarks grouped by author.
pub fn class_remarks_history(class: &Class, students: &[StudentView]) -> ClassRemarksHistory {
    let remarks = flatten_remarks(students.iter().filter(|s| s.class_id == class.id));

    let mut groups: BTreeMap<String, Vec<RecentRemark>> = BTreeMap::new();
    for remark in &remarks {
        let author = remark
            .remark
            .teacher_name
            .clone()
            .unwrap_or_else(|| UNKNOWN_TEACHER.to_string());
        groups.entry(author).or_default().push(remark.clone());
    }

    ClassRemarksHistory {
        class: class.label(),
        total_remarks: remarks.len(),
        remarks,
        by_teacher: groups
            .into_iter()
            .map(|(teacher_name, remarks)| TeacherRemarkGroup {
                teacher_name,
                remarks,
            })
            .collect(),
    }
}
