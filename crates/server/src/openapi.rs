use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct SubjectInputDoc {
    pub id: Option<i32>,
    pub name: String,
    pub teachers: Vec<String>,
}

#[derive(utoipa::ToSchema)]
pub struct ClassInputDoc {
    pub id: Option<i32>,
    pub name: String,
    pub capacity: i32,
    pub supervisor_id: Option<String>,
    pub grade_id: i32,
}

#[derive(utoipa::ToSchema)]
pub struct TeacherInputDoc {
    pub id: Option<String>,
    pub username: String,
    pub password: String,
    pub name: String,
    pub surname: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: String,
    pub img: Option<String>,
    pub blood_type: String,
    pub sex: String,
    pub birthday: String,
    pub subjects: Vec<i32>,
}

#[derive(utoipa::ToSchema)]
pub struct StudentInputDoc {
    pub id: Option<String>,
    pub username: String,
    pub password: String,
    pub name: String,
    pub surname: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: String,
    pub img: Option<String>,
    pub blood_type: String,
    pub sex: String,
    pub birthday: String,
    pub grade_id: i32,
    pub class_id: i32,
    pub parent_id: String,
}

#[derive(utoipa::ToSchema)]
pub struct ParentInputDoc {
    pub id: Option<String>,
    pub username: String,
    pub password: String,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(utoipa::ToSchema)]
pub struct ExamInputDoc {
    pub id: Option<i32>,
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub lesson_id: i32,
}

#[derive(utoipa::ToSchema)]
pub struct ResultEntryDoc {
    pub student_id: String,
    pub subject_id: i32,
    pub marks: i32,
    pub grade: String,
}

#[derive(utoipa::ToSchema)]
pub struct SubjectMarkDoc {
    pub subject_id: i32,
    pub marks: i32,
}

#[derive(utoipa::ToSchema)]
pub struct UpdateResultInputDoc {
    pub student_id: String,
    pub subjects: Vec<SubjectMarkDoc>,
}

#[derive(utoipa::ToSchema)]
pub struct AttendanceInputDoc {
    pub class_name: String,
    pub date: String,
    pub day: String,
    pub present: i32,
    pub total: i32,
}

#[derive(utoipa::ToSchema)]
pub struct DeleteFormDoc {
    pub id: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::subjects::create,
        crate::routes::subjects::update,
        crate::routes::subjects::delete,
        crate::routes::classes::create,
        crate::routes::classes::update,
        crate::routes::classes::delete,
        crate::routes::teachers::create,
        crate::routes::teachers::update,
        crate::routes::teachers::delete,
        crate::routes::students::create,
        crate::routes::students::update,
        crate::routes::students::delete,
        crate::routes::parents::create,
        crate::routes::parents::update,
        crate::routes::parents::delete,
        crate::routes::exams::create,
        crate::routes::exams::update,
        crate::routes::exams::delete,
        crate::routes::results::create,
        crate::routes::results::update,
        crate::routes::results::delete,
        crate::routes::attendance::create,
        crate::routes::attendance::update,
        crate::routes::attendance::delete,
    ),
    components(
        schemas(
            HealthResponse,
            SubjectInputDoc,
            ClassInputDoc,
            TeacherInputDoc,
            StudentInputDoc,
            ParentInputDoc,
            ExamInputDoc,
            ResultEntryDoc,
            SubjectMarkDoc,
            UpdateResultInputDoc,
            AttendanceInputDoc,
            DeleteFormDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "subjects"),
        (name = "classes"),
        (name = "teachers"),
        (name = "students"),
        (name = "parents"),
        (name = "exams"),
        (name = "results"),
        (name = "attendance"),
    )
)]
pub struct ApiDoc;
