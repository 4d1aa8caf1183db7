use crate::{
    db::DbPool,
    error::{AppResult, is_unique_violation},
    forms::city::CityForm,
    models::City,
};

#[derive(Debug)]
pub enum CityInsert {
    Created(City),
    CodeTaken,
}

pub async fn list(pool: &DbPool) -> AppResult<Vec<City>> {
    let cities = sqlx::query_as::<_, City>("SELECT * FROM cities ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(cities)
}

pub async fn create(pool: &DbPool, form: &CityForm) -> AppResult<CityInsert> {
    let result: Result<City, sqlx::Error> = sqlx::query_as(
        "INSERT INTO cities (code, name, state) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(form.code.trim())
    .bind(form.name.trim())
    .bind(form.state.trim())
    .fetch_one(pool)
    .await;

    match result {
        Ok(city) => Ok(CityInsert::Created(city)),
        Err(err) if is_unique_violation(&err) => Ok(CityInsert::CodeTaken),
        Err(err) => Err(err.into()),
    }
}
