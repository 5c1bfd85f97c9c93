fn main() {
    gyro_demos::run(gyro_demos::variants::flat_cube());
}
