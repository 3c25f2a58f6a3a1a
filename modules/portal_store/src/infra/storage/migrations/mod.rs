//! Database migrations for the portal tables

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20231028_000001_create_portals::Migration),
            Box::new(m20231028_000002_create_users::Migration),
            Box::new(m20231029_000003_create_courses::Migration),
        ]
    }
}

#[derive(DeriveIden)]
enum PortalsPortal {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum PortalsDepartment {
    Table,
    Id,
    Name,
    PortalId,
}

#[derive(DeriveIden)]
enum UsersUser {
    Table,
    Id,
    FirstName,
    LastName,
    Patronymic,
    Email,
    Password,
    BirthDate,
    CreatedAt,
    Avatar,
    Role,
    IsDismissed,
    DepartmentId,
    PortalId,
}

#[derive(DeriveIden)]
enum UsersReview {
    Table,
    Id,
    Text,
}

#[derive(DeriveIden)]
enum CoursesCourse {
    Table,
    Id,
    Name,
    Content,
    DepartmentId,
}

#[derive(DeriveIden)]
enum CoursesTest {
    Table,
    Id,
    Name,
    Content,
    DepartmentId,
}

#[derive(DeriveIden)]
enum CoursesUsercourse {
    Table,
    Id,
    UserId,
    CourseId,
    IsCompleted,
}

#[derive(DeriveIden)]
enum CoursesUsertest {
    Table,
    Id,
    UserId,
    TestId,
    IsCompleted,
}

mod m20231028_000001_create_portals {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20231028_000001_create_portals"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(PortalsPortal::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(PortalsPortal::Id).uuid().not_null().primary_key())
                        .col(
                            ColumnDef::new(PortalsPortal::Name)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(PortalsDepartment::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PortalsDepartment::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(PortalsDepartment::Name).string().not_null())
                        .col(ColumnDef::new(PortalsDepartment::PortalId).uuid().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_department_portal")
                                .from(PortalsDepartment::Table, PortalsDepartment::PortalId)
                                .to(PortalsPortal::Table, PortalsPortal::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PortalsDepartment::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(PortalsPortal::Table).to_owned())
                .await
        }
    }
}

mod m20231028_000002_create_users {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20231028_000002_create_users"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(UsersUser::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(UsersUser::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(UsersUser::FirstName).string().not_null())
                        .col(ColumnDef::new(UsersUser::LastName).string().not_null())
                        .col(ColumnDef::new(UsersUser::Patronymic).string())
                        .col(
                            ColumnDef::new(UsersUser::Email)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(UsersUser::Password).string().not_null())
                        .col(ColumnDef::new(UsersUser::BirthDate).timestamp_with_time_zone())
                        .col(
                            ColumnDef::new(UsersUser::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(ColumnDef::new(UsersUser::Avatar).string().not_null())
                        .col(
                            ColumnDef::new(UsersUser::Role)
                                .string()
                                .not_null()
                                .default("worker"),
                        )
                        .col(
                            ColumnDef::new(UsersUser::IsDismissed)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(UsersUser::DepartmentId).uuid())
                        .col(ColumnDef::new(UsersUser::PortalId).uuid())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_user_department")
                                .from(UsersUser::Table, UsersUser::DepartmentId)
                                .to(PortalsDepartment::Table, PortalsDepartment::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_user_portal")
                                .from(UsersUser::Table, UsersUser::PortalId)
                                .to(PortalsPortal::Table, PortalsPortal::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_users_user_created_at")
                        .table(UsersUser::Table)
                        .col(UsersUser::CreatedAt)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(UsersReview::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(UsersReview::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(UsersReview::Text).text().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(UsersReview::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(UsersUser::Table).to_owned())
                .await
        }
    }
}

mod m20231029_000003_create_courses {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20231029_000003_create_courses"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(CoursesCourse::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(CoursesCourse::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(CoursesCourse::Name).string().not_null())
                        .col(ColumnDef::new(CoursesCourse::Content).text().not_null())
                        .col(ColumnDef::new(CoursesCourse::DepartmentId).uuid().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_course_department")
                                .from(CoursesCourse::Table, CoursesCourse::DepartmentId)
                                .to(PortalsDepartment::Table, PortalsDepartment::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(CoursesTest::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(CoursesTest::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(CoursesTest::Name).string().not_null())
                        .col(ColumnDef::new(CoursesTest::Content).json().not_null())
                        .col(ColumnDef::new(CoursesTest::DepartmentId).uuid().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_test_department")
                                .from(CoursesTest::Table, CoursesTest::DepartmentId)
                                .to(PortalsDepartment::Table, PortalsDepartment::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(CoursesUsercourse::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CoursesUsercourse::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(CoursesUsercourse::UserId).uuid().not_null())
                        .col(ColumnDef::new(CoursesUsercourse::CourseId).uuid().not_null())
                        .col(
                            ColumnDef::new(CoursesUsercourse::IsCompleted)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_usercourse_user")
                                .from(CoursesUsercourse::Table, CoursesUsercourse::UserId)
                                .to(UsersUser::Table, UsersUser::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_usercourse_course")
                                .from(CoursesUsercourse::Table, CoursesUsercourse::CourseId)
                                .to(CoursesCourse::Table, CoursesCourse::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("uq_usercourse_user_course")
                        .table(CoursesUsercourse::Table)
                        .col(CoursesUsercourse::UserId)
                        .col(CoursesUsercourse::CourseId)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(CoursesUsertest::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CoursesUsertest::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(CoursesUsertest::UserId).uuid().not_null())
                        .col(ColumnDef::new(CoursesUsertest::TestId).uuid().not_null())
                        .col(
                            ColumnDef::new(CoursesUsertest::IsCompleted)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_usertest_user")
                                .from(CoursesUsertest::Table, CoursesUsertest::UserId)
                                .to(UsersUser::Table, UsersUser::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_usertest_test")
                                .from(CoursesUsertest::Table, CoursesUsertest::TestId)
                                .to(CoursesTest::Table, CoursesTest::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("uq_usertest_user_test")
                        .table(CoursesUsertest::Table)
                        .col(CoursesUsertest::UserId)
                        .col(CoursesUsertest::TestId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(CoursesUsertest::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(CoursesUsercourse::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(CoursesTest::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(CoursesCourse::Table).to_owned())
                .await
        }
    }
}
