use benchpair::error::AppResult;

fn main() -> AppResult<()> {
    benchpair::run()
}
