use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Student: index on class_id (capacity pre-check counts by class)
        manager
            .create_index(
                Index::create()
                    .name("idx_student_class")
                    .table(Student::Table)
                    .col(Student::ClassId)
                    .to_owned(),
            )
            .await?;

        // Lesson: index on teacher_id (exam authorization gate)
        manager
            .create_index(
                Index::create()
                    .name("idx_lesson_teacher")
                    .table(Lesson::Table)
                    .col(Lesson::TeacherId)
                    .to_owned(),
            )
            .await?;

        // Exam: index on lesson_id
        manager
            .create_index(
                Index::create()
                    .name("idx_exam_lesson")
                    .table(Exam::Table)
                    .col(Exam::LessonId)
                    .to_owned(),
            )
            .await?;

        // Result: indexes on student_id and subject_id
        manager
            .create_index(
                Index::create()
                    .name("idx_result_student")
                    .table(ExamResult::Table)
                    .col(ExamResult::StudentId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_result_subject")
                    .table(ExamResult::Table)
                    .col(ExamResult::SubjectId)
                    .to_owned(),
            )
            .await?;

        // Attendance: composite index on (class_name, date)
        manager
            .create_index(
                Index::create()
                    .name("idx_attendance_class_date")
                    .table(Attendance::Table)
                    .col(Attendance::ClassName)
                    .col(Attendance::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_student_class").table(Student::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_lesson_teacher").table(Lesson::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_exam_lesson").table(Exam::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_result_student").table(ExamResult::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_result_subject").table(ExamResult::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_attendance_class_date").table(Attendance::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Student { Table, ClassId }

#[derive(DeriveIden)]
enum Lesson { Table, TeacherId }

#[derive(DeriveIden)]
enum Exam { Table, LessonId }

#[derive(DeriveIden)]
enum ExamResult {
    #[sea_orm(iden = "result")]
    Table,
    StudentId,
    SubjectId,
}

#[derive(DeriveIden)]
enum Attendance { Table, ClassName, Date }
