//! Tests and marks: creation, marks entry and derived results.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use super::aggregator::ensure_class_accessible;
use crate::auth::Session;
use crate::db::DbPool;
use crate::db::school_tests::NewSchoolTest;
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateTestRequest, MarksEntry, ResultStatus, SchoolTest, Student, StudentResult, TestResult,
    TestResultsResponse, TestResultsSummary, round_to,
};

/// Validate a create request. `today` fills in a missing test date.
pub fn validate_new_test(
    request: &CreateTestRequest,
    created_by: Option<Uuid>,
    today: NaiveDate,
) -> AppResult<NewSchoolTest> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput("Test name is required".to_string()));
    }
    let class_id = request
        .class_id
        .ok_or_else(|| AppError::InvalidInput("Please select a class".to_string()))?;
    let total_marks = request
        .total_marks
        .ok_or_else(|| AppError::InvalidInput("Total marks are required".to_string()))?;
    let pass_marks = request
        .pass_marks
        .ok_or_else(|| AppError::InvalidInput("Pass marks are required".to_string()))?;

    if total_marks <= 0 {
        return Err(AppError::InvalidInput(
            "Total marks must be greater than zero".to_string(),
        ));
    }
    if pass_marks < 0 {
        return Err(AppError::InvalidInput(
            "Pass marks cannot be negative".to_string(),
        ));
    }
    if pass_marks > total_marks {
        return Err(AppError::InvalidInput(
            "Pass marks cannot be greater than total marks".to_string(),
        ));
    }

    Ok(NewSchoolTest {
        name: name.to_string(),
        class_id,
        subject_id: request.subject_id,
        total_marks,
        pass_marks,
        test_date: request.test_date.unwrap_or(today),
        created_by,
    })
}

/// Validate marks against the test and its roster.
///
/// Later entries for the same student replace earlier ones.
pub fn validate_marks(
    test: &SchoolTest,
    roster: &HashSet<Uuid>,
    marks: &[MarksEntry],
) -> AppResult<Vec<MarksEntry>> {
    if marks.is_empty() {
        return Err(AppError::InvalidInput("No marks to save".to_string()));
    }

    let mut order: Vec<Uuid> = Vec::new();
    let mut latest: HashMap<Uuid, i32> = HashMap::new();
    for entry in marks {
        if !(0..=test.total_marks).contains(&entry.marks_obtained) {
            return Err(AppError::InvalidInput(format!(
                "Marks must be between 0 and {}",
                test.total_marks
            )));
        }
        if !roster.contains(&entry.student_id) {
            return Err(AppError::InvalidInput(format!(
                "Student {} is not in this test's class",
                entry.student_id
            )));
        }
        if latest.insert(entry.student_id, entry.marks_obtained).is_none() {
            order.push(entry.student_id);
        }
    }

    Ok(order
        .into_iter()
        .map(|student_id| MarksEntry {
            student_id,
            marks_obtained: latest[&student_id],
        })
        .collect())
}

/// Derive per-student results and the summary, ordered by roll number.
pub fn build_results(
    test: SchoolTest,
    students: &[Student],
    results: &[TestResult],
) -> TestResultsResponse {
    let by_id: HashMap<Uuid, &Student> = students.iter().map(|s| (s.id, s)).collect();

    let mut rows: Vec<StudentResult> = results
        .iter()
        .filter_map(|r| {
            let student = by_id.get(&r.student_id)?;
            Some(StudentResult {
                student_id: r.student_id,
                student_name: student.name.clone(),
                roll_number: student.roll_number.clone(),
                marks_obtained: r.marks_obtained,
                status: test.status_for(r.marks_obtained),
                percentage: round_to(test.percentage_for(r.marks_obtained), 2),
            })
        })
        .collect();
    rows.sort_by(|a, b| {
        a.roll_number
            .cmp(&b.roll_number)
            .then_with(|| a.student_name.cmp(&b.student_name))
    });

    let pass_count = rows.iter().filter(|r| r.status == ResultStatus::Pass).count();
    let average_marks = if rows.is_empty() {
        0.0
    } else {
        let total: i64 = rows.iter().map(|r| r.marks_obtained as i64).sum();
        round_to(total as f64 / rows.len() as f64, 2)
    };

    TestResultsResponse {
        summary: TestResultsSummary {
            pass_count,
            fail_count: rows.len() - pass_count,
            average_marks,
        },
        results: rows,
        test,
    }
}

/// Create a test for an accessible class.
pub async fn create_test(
    pool: &DbPool,
    session: &Session,
    request: &CreateTestRequest,
) -> AppResult<SchoolTest> {
    let created_by = session.author_id()?;
    let new_test = validate_new_test(request, Some(created_by), Utc::now().date_naive())?;

    ensure_class_accessible(pool, session, new_test.class_id).await?;
    if let Some(subject_id) = new_test.subject_id {
        pool.get_subject_by_id(subject_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Subject".to_string()))?;
    }

    let test = pool.insert_school_test(new_test).await?;
    info!(test_id = %test.id, class_id = %test.class_id, "Test created");
    Ok(test)
}

async fn accessible_test(pool: &DbPool, session: &Session, test_id: Uuid) -> AppResult<SchoolTest> {
    let test = pool
        .get_school_test_by_id(test_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Test".to_string()))?;
    ensure_class_accessible(pool, session, test.class_id).await?;
    Ok(test)
}

/// Save marks for a test as one upsert. Returns the number of rows written.
pub async fn save_marks(
    pool: &DbPool,
    session: &Session,
    test_id: Uuid,
    marks: &[MarksEntry],
) -> AppResult<usize> {
    let test = accessible_test(pool, session, test_id).await?;
    let roster: HashSet<Uuid> = pool
        .get_class_roster(test.class_id)
        .await?
        .into_iter()
        .map(|s| s.id)
        .collect();

    let entries = validate_marks(&test, &roster, marks)?;
    pool.upsert_test_results(test.id, &entries).await?;

    info!(
        test_id = %test.id,
        count = entries.len(),
        entered_by = %session.full_name,
        "Marks saved"
    );
    Ok(entries.len())
}

/// Results of a test with pass/fail status and summary.
pub async fn get_results(
    pool: &DbPool,
    session: &Session,
    test_id: Uuid,
) -> AppResult<TestResultsResponse> {
    let test = accessible_test(pool, session, test_id).await?;
    let results = pool.get_test_results(test.id).await?;
    let student_ids: Vec<Uuid> = results.iter().map(|r| r.student_id).collect();
    let students = pool.get_students_by_ids(&student_ids).await?;
    Ok(build_results(test, &students, &results))
}

/// Tests of an accessible class, newest test date first.
pub async fn list_tests(
    pool: &DbPool,
    session: &Session,
    class_id: Uuid,
) -> AppResult<Vec<SchoolTest>> {
    ensure_class_accessible(pool, session, class_id).await?;
    pool.list_school_tests_for_class(class_id).await
}

/// Roster of an accessible class by roll number.
pub async fn class_roster(
    pool: &DbPool,
    session: &Session,
    class_id: Uuid,
) -> AppResult<Vec<Student>> {
    ensure_class_accessible(pool, session, class_id).await?;
    pool.get_class_roster(class_id).await
}
