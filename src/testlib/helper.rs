use tempfile::TempDir;

use crate::{
    config::jdbc_config::JdbcConfig, rdbc::sqlite::sqlite_driver::SQLITE_DRIVER_NAME,
    rdbc::value::Value, util::data_access_helper::DataAccessHelper,
};

pub fn sqlite_config(dir: &TempDir) -> JdbcConfig {
    JdbcConfig {
        username: Some("root".to_string()),
        password: Some("root".to_string()),
        driver: Some(SQLITE_DRIVER_NAME.to_string()),
        url: Some(format!(
            "jdbc:sqlite:{}",
            dir.path().join("blog.db").display()
        )),
    }
}

pub fn create_article_data(helper: &mut DataAccessHelper) {
    let cmd = "create table article(id integer primary key, title varchar(20), body text, published text)";
    helper.execute_update(cmd, None).unwrap();

    let cmd = "insert into article(id, title, body) values (?, ?, ?)";
    let articles = [
        (1, "A", None),
        (2, "B", Some("second")),
        (3, "C", Some("third")),
    ];

    for (id, title, body) in articles {
        let params = [Value::from(id), Value::from(title), Value::from(body)];
        assert!(helper.execute_update(cmd, Some(&params)).unwrap());
    }
}
