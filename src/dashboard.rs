use crate::{
    client::RecordsApi,
    data::{
        Resource, course::Course, enrollment::Enrollment, student::Student, teacher::Teacher,
    },
    error::RegistrarResult,
};

/// Record counts per kind. Each count succeeds or fails on its own.
#[derive(Debug)]
pub struct DashboardCounts {
    pub students: RegistrarResult<usize>,
    pub teachers: RegistrarResult<usize>,
    pub courses: RegistrarResult<usize>,
    pub enrollments: RegistrarResult<usize>,
}

impl DashboardCounts {
    pub fn tiles(&self) -> [(&'static str, &'static str, &RegistrarResult<usize>); 4] {
        [
            ("Students", "/students", &self.students),
            ("Teachers", "/teachers", &self.teachers),
            ("Courses", "/courses", &self.courses),
            ("Enrollments", "/enrollments", &self.enrollments),
        ]
    }
}

async fn count<R: Resource>(api: &RecordsApi) -> RegistrarResult<usize> {
    api.records::<R>().list().await.map(|records| records.len())
}

pub async fn load_counts(api: &RecordsApi) -> DashboardCounts {
    let (students, teachers, courses, enrollments) = tokio::join!(
        count::<Student>(api),
        count::<Teacher>(api),
        count::<Course>(api),
        count::<Enrollment>(api),
    );

    let counts = DashboardCounts {
        students,
        teachers,
        courses,
        enrollments,
    };
    for (label, _, count) in counts.tiles() {
        if let Err(e) = count {
            warn!(?e, label, "unable to count records for the dashboard");
        }
    }
    counts
}
