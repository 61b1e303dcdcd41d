use objlist::collection::Record;
use objlist::common::Value;
use objlist::errors::ObjListResult;
use objlist::obj_list::ObjList;
use objlist::record;

/// Runs a test against a fresh context and fails with the error it
/// returns, if any.
pub fn run_test<T, B>(before: B, test: T)
where
    T: FnOnce(TestContext) -> ObjListResult<()>,
    B: FnOnce() -> ObjListResult<TestContext>,
{
    let ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };

    if let Err(e) = test(ctx) {
        panic!("Test failed: {:?}", e);
    }
}

#[derive(Clone)]
pub struct TestContext {
    engine: ObjList,
    users: Vec<Record>,
}

impl TestContext {
    pub fn new(engine: ObjList, users: Vec<Record>) -> Self {
        Self { engine, users }
    }

    pub fn engine(&self) -> ObjList {
        self.engine.clone()
    }

    /// Returns a fresh copy of the user fixture.
    pub fn users(&self) -> Vec<Record> {
        self.users.clone()
    }
}

pub fn create_test_context() -> ObjListResult<TestContext> {
    let engine = ObjList::builder().build()?;
    Ok(TestContext::new(engine, users()))
}

/// Ten user records, ordered by id.
///
/// `common` is `"abc"` for users 1, 3 and 6; `common2` is `"def"` for
/// users 1 and 3 only.
pub fn users() -> Vec<Record> {
    vec![
        record! {
            id: 1,
            name: "Leanne Graham",
            username: "Bret",
            email: "Sincere@april.biz",
            address: { street: "Kulas Light", city: "Gwenborough", zipcode: "92998-3874" },
            common: "abc",
            common2: "def"
        },
        record! {
            id: 2,
            name: "Ervin Howell",
            username: "Antonette",
            email: "Shanna@melissa.tv",
            address: { street: "Victor Plains", city: "Wisokyburgh", zipcode: "90566-7771" },
            common: "xyz"
        },
        record! {
            id: 3,
            name: "Clementine Bauch",
            username: "Samantha",
            email: "Nathan@yesenia.net",
            address: { street: "Douglas Extension", city: "McKenziehaven", zipcode: "59590-4157" },
            common: "abc",
            common2: "def"
        },
        record! {
            id: 4,
            name: "Patricia Lebsack",
            username: "Karianne",
            email: "Julianne.OConner@kory.org",
            address: { street: "Hoeger Mall", city: "South Elvis", zipcode: "53919-4257" },
            common: "xyz",
            common2: "def"
        },
        record! {
            id: 5,
            name: "Chelsey Dietrich",
            username: "Kamren",
            email: "Lucio_Hettinger@annie.ca",
            address: { street: "Skiles Walks", city: "Roscoeview", zipcode: "33263" }
        },
        record! {
            id: 6,
            name: "Mrs. Dennis Schulist",
            username: "Leopoldo_Corkery",
            email: "Karley_Dach@jasper.info",
            address: { street: "Norberto Crossing", city: "South Christy", zipcode: "23505-1337" },
            common: "abc"
        },
        record! {
            id: 7,
            name: "Kurtis Weissnat",
            username: "Elwyn.Skiles",
            email: "Telly.Hoeger@billy.biz",
            address: { street: "Rex Trail", city: "Howemouth", zipcode: "58804-1099" }
        },
        record! {
            id: 8,
            name: "Nicholas Runolfsdottir V",
            username: "Maxime_Nienow",
            email: "Sherwood@rosamond.me",
            address: { street: "Ellsworth Summit", city: "Aliyaview", zipcode: "45169" }
        },
        record! {
            id: 9,
            name: "Glenna Reichert",
            username: "Delphine",
            email: "Chaim_McDermott@dana.io",
            address: { street: "Dayna Park", city: "Bartholomebury", zipcode: "76495-3109" }
        },
        record! {
            id: 10,
            name: "Clementina DuBuque",
            username: "Moriah.Stanton",
            email: "Rey.Padberg@karina.biz",
            address: { street: "Kattie Turnpike", city: "Lebsackbury", zipcode: "31428-2261" }
        },
    ]
}

/// Reads one field of every record, in collection order.
pub fn field_values(collection: &[Record], field: &str) -> ObjListResult<Vec<Value>> {
    collection.iter().map(|record| record.get(field)).collect()
}

/// Reads the `id` of every record as an integer, in collection order.
pub fn ids(collection: &[Record]) -> ObjListResult<Vec<i64>> {
    Ok(field_values(collection, "id")?
        .iter()
        .filter_map(|value| value.as_i64())
        .collect())
}
